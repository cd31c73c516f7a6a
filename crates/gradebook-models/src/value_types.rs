//! Value objects with validation for domain primitives.
//!
//! [`PhoneNumber`] is a validated newtype with a custom codec: the sqlx
//! implementations persist the normalized E.164 form, the serde
//! implementations carry the textual form and re-validate on the way in.
//! [`Address`] is an embedded value object whose fields are flattened into
//! the owning record by the persistence layer.

use serde::{Deserialize, Serialize};
use sqlx::{Database, Decode, Encode, Type, postgres::PgTypeInfo};
use std::fmt;
use std::str::FromStr;

/// Error type for value object parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// The phone number is invalid.
    InvalidPhoneNumber(String),
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhoneNumber(msg) => write!(f, "Invalid phone number: {}", msg),
        }
    }
}

/// A validated phone number.
///
/// Accepts international formats: an optional leading `+`, then digits with
/// spaces, dashes, and parentheses as separators. Digit count is bounded by
/// the E.164 standard (7 to 15).
///
/// The persisted scalar form is the normalized output of [`to_e164`]; the
/// original formatting is kept in memory and on the wire.
///
/// [`to_e164`]: PhoneNumber::to_e164
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 15;

    /// Creates a new `PhoneNumber` from a string, validating it.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValueTypeError> {
        let phone = phone.into();
        Self::validate(&phone)?;
        Ok(Self(phone))
    }

    /// Creates a `PhoneNumber` without validation.
    ///
    /// Intended for loading from a trusted source (the database) where
    /// validation already happened on the way in.
    #[inline]
    pub fn new_unchecked(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    /// The phone number as entered.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the digits, with all separators stripped.
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// The normalized E.164 form: digits only, with the leading `+` kept
    /// when present. This is the persisted scalar representation.
    pub fn to_e164(&self) -> String {
        let digits = self.digits_only();
        if self.0.starts_with('+') {
            format!("+{}", digits)
        } else {
            digits
        }
    }

    fn validate(phone: &str) -> Result<(), ValueTypeError> {
        if phone.is_empty() {
            return Err(ValueTypeError::InvalidPhoneNumber(
                "phone number cannot be empty".into(),
            ));
        }

        let valid_chars = phone.chars().all(|c| {
            c.is_ascii_digit() || c == '+' || c == '-' || c == '(' || c == ')' || c == ' '
        });
        if !valid_chars {
            return Err(ValueTypeError::InvalidPhoneNumber(format!(
                "'{}' contains invalid characters",
                phone
            )));
        }

        // + can only appear at the start
        if phone.chars().skip(1).any(|c| c == '+') {
            return Err(ValueTypeError::InvalidPhoneNumber(
                "+ can only appear at the start".into(),
            ));
        }

        let digit_count = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digit_count < Self::MIN_DIGITS || digit_count > Self::MAX_DIGITS {
            return Err(ValueTypeError::InvalidPhoneNumber(format!(
                "expected between {} and {} digits, got {}",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS,
                digit_count
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhoneNumber({})", self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PhoneNumber {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> String {
        phone.0
    }
}

// SQLx Type implementation for Postgres
impl Type<sqlx::Postgres> for PhoneNumber {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

// SQLx Encode implementation - persists the normalized E.164 form
impl<'q> Encode<'q, sqlx::Postgres> for PhoneNumber {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.to_e164(), buf)
    }
}

// SQLx Decode implementation - database values were normalized on the way in
impl<'r> Decode<'r, sqlx::Postgres> for PhoneNumber {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::new_unchecked(s))
    }
}

// Serde Deserialize with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// An embedded postal address.
///
/// Has no identity of its own: the persistence layer flattens these fields
/// into the owning student row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}
