//! The closed enumeration of academic disciplines.

use serde::{Deserialize, Serialize};
use sqlx::{Database, Decode, Encode, Type, postgres::PgTypeInfo};
use std::fmt;
use std::str::FromStr;

/// An academic subject.
///
/// The enumeration is closed: every student carries exactly one grade slot
/// per variant, and the collection-table representation keys on the variant
/// name. Variant order defines the canonical sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    Biology,
    English,
    Mathematics,
    Physics,
}

impl Discipline {
    /// Every discipline, in ascending order.
    pub const ALL: [Discipline; 4] = [
        Discipline::Biology,
        Discipline::English,
        Discipline::Mathematics,
        Discipline::Physics,
    ];

    /// The stable textual name used in persistence and on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Discipline::Biology => "biology",
            Discipline::English => "english",
            Discipline::Mathematics => "mathematics",
            Discipline::Physics => "physics",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a textual discipline name is not part of the
/// enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDiscipline(pub String);

impl std::error::Error for UnknownDiscipline {}

impl fmt::Display for UnknownDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown discipline: '{}'", self.0)
    }
}

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biology" => Ok(Discipline::Biology),
            "english" => Ok(Discipline::English),
            "mathematics" => Ok(Discipline::Mathematics),
            "physics" => Ok(Discipline::Physics),
            other => Err(UnknownDiscipline(other.to_string())),
        }
    }
}

// SQLx Type implementation for Postgres - stored as text
impl Type<sqlx::Postgres> for Discipline {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

// SQLx Encode implementation
impl<'q> Encode<'q, sqlx::Postgres> for Discipline {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

// SQLx Decode implementation - unknown names are a decode error
impl<'r> Decode<'r, sqlx::Postgres> for Discipline {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Discipline>()?)
    }
}
