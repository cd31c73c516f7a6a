//! Behavioral contract of the student record, exercised through the public
//! facade.

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use gradebook::{Discipline, Gender, Student, StudentId, StudentValidationError};

fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 4, 12).unwrap()
}

#[test]
fn valid_students_pass_validation() {
    for _ in 0..25 {
        let last: String = LastName().fake();
        let first: String = FirstName().fake();
        let student = Student::new(last, first, birth_date());
        assert!(student.validate().is_ok());
    }
}

#[test]
fn missing_fields_are_reported_in_fixed_order() {
    // first name wins over everything else
    let mut student = Student::default();
    student.last_name = Some("Hostettler".into());
    assert_eq!(
        student.validate(),
        Err(StudentValidationError::MissingFirstName)
    );

    // then last name
    let mut student = Student::default();
    student.first_name = Some("Steve".into());
    assert_eq!(
        student.validate(),
        Err(StudentValidationError::MissingLastName)
    );

    // then birth date
    let mut student = Student::new("Hostettler", "Steve", birth_date());
    student.birth_date = None;
    assert_eq!(
        student.validate(),
        Err(StudentValidationError::MissingBirthDate)
    );
}

#[test]
fn fresh_student_has_one_ungraded_slot_per_discipline() {
    let student = Student::default();
    assert_eq!(student.grades.len(), Discipline::ALL.len());
    assert!(student.grades.iter().all(|g| !g.is_scored()));

    let mut seen: Vec<_> = student.grades.iter().map(|g| g.discipline).collect();
    seen.sort();
    assert_eq!(seen, Discipline::ALL.to_vec());
}

#[test]
fn fresh_student_averages_to_zero() {
    let student = Student::new("Hostettler", "Steve", birth_date());
    assert_eq!(student.avg_grade(), 0.0);
}

#[test]
fn average_divides_by_the_full_slot_count() {
    let mut student = Student::new("Hostettler", "Steve", birth_date());
    for grade in &mut student.grades {
        grade.score = match grade.discipline {
            Discipline::Mathematics => Some(5),
            Discipline::Physics => Some(3),
            _ => None,
        };
    }
    // 8 over 4 slots; the two ungraded disciplines drag the average down
    assert_eq!(student.avg_grade(), 2.0);
    assert_ne!(student.avg_grade(), 4.0);
}

#[test]
fn identity_ignores_every_non_key_field() {
    let mut a = Student::new("Hostettler", "Steve", birth_date());
    let mut b = Student::new("Hostettler", "Steve", birth_date());
    a.id = Some(StudentId(1));
    b.id = Some(StudentId(99));
    a.gender = Some(Gender::Male);
    b.gender = Some(Gender::Female);
    b.picture = Some(vec![1, 2, 3]);
    for grade in &mut b.grades {
        grade.score = Some(6);
    }

    assert_eq!(a, b);
    assert_eq!(a.identity_hash(), b.identity_hash());
}

#[test]
fn missing_last_name_hashes_to_minus_one() {
    let mut student = Student::new("Hostettler", "Steve", birth_date());
    student.last_name = None;
    assert_eq!(student.identity_hash(), -1);
}

#[test]
fn key_prefers_the_assigned_id() {
    let mut student = Student::new("Hostettler", "Steve", birth_date());
    assert!(!student.key().is_empty());

    student.id = Some(StudentId(42));
    assert_eq!(student.key(), "42");
}

#[test]
fn transient_key_is_stable_for_equal_identities() {
    let a = Student::new("Hostettler", "Steve", birth_date());
    let b = Student::new("Hostettler", "Steve", birth_date());
    assert_eq!(a.key(), b.key());
    assert!(!a.key().is_empty());
}

#[test]
fn disciplines_come_from_the_closed_enumeration() {
    let student = Student::default();
    assert_eq!(student.disciplines(), &Discipline::ALL);

    // independent of the student's actual grade list
    let mut student = Student::default();
    student.grades.clear();
    assert_eq!(student.disciplines(), &Discipline::ALL);
}
