//! The student record: entity, identity semantics, wire representation, and
//! request DTOs.
//!
//! `Student` itself carries no persistence or serialization derives; the
//! mapping metadata lives in the schema descriptor of `gradebook-db`, and the
//! serialized shape is [`StudentRecord`]. Identity is the natural key
//! (last name, first name, birth date) rather than the surrogate id.

use crate::badges::Badge;
use crate::disciplines::Discipline;
use crate::grades::Grade;
use crate::ids::StudentId;
use crate::value_types::{Address, PhoneNumber};
use chrono::{Datelike, NaiveDate};
use gradebook_core::hashing::{stable_hash_bytes, stable_hash_str};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use validator::Validate;

/// A student's gender.
///
/// Deliberately absent from the persisted schema, the wire representation,
/// and the identity semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// Error raised by [`Student::validate`] when a mandatory field is missing.
///
/// Checks run in a fixed order (first name, last name, birth date) and only
/// the first failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentValidationError {
    MissingFirstName,
    MissingLastName,
    MissingBirthDate,
}

impl std::error::Error for StudentValidationError {}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFirstName => write!(f, "first name is mandatory"),
            Self::MissingLastName => write!(f, "last name is mandatory"),
            Self::MissingBirthDate => write!(f, "birth date is mandatory"),
        }
    }
}

/// A student record.
///
/// Transient until the repository assigns an `id`. Every constructed student
/// starts with one ungraded [`Grade`] slot per [`Discipline`], in descending
/// discipline order. Mutation goes through the public fields; invariants are
/// re-checked only when the caller invokes [`validate`].
///
/// [`validate`]: Student::validate
#[derive(Debug, Clone)]
pub struct Student {
    /// Surrogate key, assigned by the database on insert.
    pub id: Option<StudentId>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: Option<PhoneNumber>,
    /// Transient: never persisted or serialized.
    pub gender: Option<Gender>,
    /// Embedded value, flattened into the student row.
    pub address: Option<Address>,
    /// Owned grade slots, one per discipline, descending discipline order.
    pub grades: Vec<Grade>,
    /// Denormalized parallel representation of the scored grades, kept in a
    /// separate collection table.
    pub alternative_grades: BTreeMap<Discipline, i32>,
    /// Large binary, stored in the secondary table and loaded on demand.
    pub picture: Option<Vec<u8>>,
    /// Back-reference only; the badge side owns the association.
    pub badge: Option<Badge>,
}

impl Default for Student {
    /// A transient student with the full set of ungraded grade slots.
    fn default() -> Self {
        Self {
            id: None,
            last_name: None,
            first_name: None,
            birth_date: None,
            phone_number: None,
            gender: None,
            address: None,
            grades: Discipline::ALL.iter().rev().map(|&d| Grade::new(d)).collect(),
            alternative_grades: BTreeMap::new(),
            picture: None,
            badge: None,
        }
    }
}

impl Student {
    /// Convenience constructor over the mandatory fields.
    ///
    /// The argument types make the mandatory fields statically present, so
    /// the result always passes [`validate`].
    ///
    /// [`validate`]: Student::validate
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            last_name: Some(last_name.into()),
            first_name: Some(first_name.into()),
            birth_date: Some(birth_date),
            ..Self::default()
        }
    }

    /// A non-empty textual key for this record.
    ///
    /// The persisted id when assigned, else the identity hash of the
    /// transient instance. Uniqueness for transient instances is only as
    /// good as the hash.
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.identity_hash().to_string(),
        }
    }

    /// The average over all grade slots.
    ///
    /// Present scores are summed and divided by the total slot count, so
    /// ungraded disciplines lower the average instead of being excluded.
    /// An empty grade list averages to 0.
    pub fn avg_grade(&self) -> f32 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .grades
            .iter()
            .filter_map(|grade| grade.score)
            .map(|score| score as f32)
            .sum();
        sum / self.grades.len() as f32
    }

    /// The full discipline enumeration, independent of this student's
    /// actual grades.
    pub fn disciplines(&self) -> &'static [Discipline] {
        &Discipline::ALL
    }

    /// Checks the mandatory fields in fixed order and reports the first
    /// missing one. Caller-invoked; mutation does not re-validate.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.first_name.is_none() {
            return Err(StudentValidationError::MissingFirstName);
        }
        if self.last_name.is_none() {
            return Err(StudentValidationError::MissingLastName);
        }
        if self.birth_date.is_none() {
            return Err(StudentValidationError::MissingBirthDate);
        }
        Ok(())
    }

    /// A stable hash over the natural identity (last name, first name,
    /// birth date), composed by exclusive-or.
    ///
    /// An instance without a last name hashes to the sentinel `-1`; other
    /// absent identity fields contribute nothing.
    pub fn identity_hash(&self) -> i64 {
        let Some(last_name) = &self.last_name else {
            return -1;
        };
        let mut hash = stable_hash_str(last_name);
        if let Some(first_name) = &self.first_name {
            hash ^= stable_hash_str(first_name);
        }
        if let Some(birth_date) = &self.birth_date {
            hash ^= stable_hash_bytes(&birth_date.num_days_from_ce().to_be_bytes());
        }
        hash
    }
}

/// Two students are the same logical person iff last name, first name, and
/// birth date all compare equal, whatever the other fields hold.
impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.last_name == other.last_name
            && self.first_name == other.first_name
            && self.birth_date == other.birth_date
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.identity_hash());
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student [id={:?}, last_name={:?}, first_name={:?}, birth_date={:?}, \
             phone_number={:?}, grades={:?}]",
            self.id, self.last_name, self.first_name, self.birth_date, self.phone_number,
            self.grades
        )
    }
}

/// The serialized shape of a student.
///
/// Fields appear in declaration order; the last name travels under the
/// external tag `last_name`; gender is absent. The (de)serialization engine
/// underneath is a collaborator, not part of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: Option<PhoneNumber>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alternative_grades: BTreeMap<Discipline, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl From<&Student> for StudentRecord {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            last_name: student.last_name.clone(),
            first_name: student.first_name.clone(),
            birth_date: student.birth_date,
            phone_number: student.phone_number.clone(),
            address: student.address.clone(),
            grades: student.grades.clone(),
            alternative_grades: student.alternative_grades.clone(),
            picture: student.picture.clone(),
            badge: student.badge.clone(),
        }
    }
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: record.id,
            last_name: record.last_name,
            first_name: record.first_name,
            birth_date: record.birth_date,
            phone_number: record.phone_number,
            gender: None,
            address: record.address,
            grades: record.grades,
            alternative_grades: record.alternative_grades,
            picture: record.picture,
            badge: record.badge,
        }
    }
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 35))]
    pub first_name: String,
    #[validate(length(min = 1, max = 35))]
    pub last_name: Option<String>,
    pub birth_date: NaiveDate,
    pub phone_number: Option<PhoneNumber>,
    pub address: Option<Address>,
}

impl From<CreateStudentDto> for Student {
    fn from(dto: CreateStudentDto) -> Self {
        Self {
            last_name: dto.last_name,
            first_name: Some(dto.first_name),
            birth_date: Some(dto.birth_date),
            phone_number: dto.phone_number,
            address: dto.address,
            ..Self::default()
        }
    }
}

/// DTO for updating an existing student.
///
/// All fields are optional; only provided fields are updated.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 35))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 35))]
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: Option<PhoneNumber>,
    pub address: Option<Address>,
}
