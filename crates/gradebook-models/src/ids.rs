//! Strongly-typed ID newtypes for domain entities.
//!
//! Surrogate keys are database-assigned `BIGINT` identity values, so each
//! newtype wraps an `i64`. Wrapping prevents accidental misuse (passing a
//! `BadgeId` where a `StudentId` is expected fails to compile) while keeping
//! the wire and database representation a plain integer.

use serde::{Deserialize, Serialize};
use sqlx::{Database, Decode, Encode, Type, postgres::PgTypeInfo};
use std::fmt;

/// Macro to define a strongly-typed ID newtype over `i64`.
///
/// Generates the trait implementations needed for database binds, row
/// decoding, and serialization.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps an existing key value.
            #[inline]
            pub const fn from_i64(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw key value.
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        // SQLx Type implementation for Postgres
        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i64 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i64 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        // SQLx Encode implementation
        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i64 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        // SQLx Decode implementation
        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i64 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        // Serde Deserialize - manual impl for transparent integer deserialization
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i64::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for Student entities.
    StudentId
);

define_id!(
    /// Strongly-typed ID for Grade entities.
    GradeId
);

define_id!(
    /// Strongly-typed ID for Badge entities.
    BadgeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = StudentId::from_i64(42);
        assert_eq!(id.into_inner(), 42);
        let raw: i64 = id.into();
        assert_eq!(raw, 42);
        assert_eq!(StudentId::from(raw), id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", StudentId(7)), "7");
        assert_eq!(format!("{:?}", BadgeId(7)), "BadgeId(7)");
    }

    #[test]
    fn test_id_from_str() {
        let id: GradeId = "19".parse().unwrap();
        assert_eq!(id, GradeId(19));
        assert!("not-a-number".parse::<GradeId>().is_err());
    }

    #[test]
    fn test_id_serialize() {
        let json = serde_json::to_string(&StudentId(3)).unwrap();
        assert_eq!(json, "3");
        let back: StudentId = serde_json::from_str("3").unwrap();
        assert_eq!(back, StudentId(3));
    }

    #[test]
    fn test_id_ordering() {
        assert!(StudentId(1) < StudentId(2));
    }
}
