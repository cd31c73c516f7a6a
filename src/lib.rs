//! # Gradebook
//!
//! A student record domain library with explicit persistence mapping.
//!
//! ## Overview
//!
//! The library models one record type, the student, together with its
//! validation rules, natural-key identity, and derived average-grade
//! computation. Unlike annotation-driven entity frameworks, the entity type
//! carries no mapping metadata: everything the persistence layer needs is
//! declared in an explicit schema descriptor, and the serialized shape is a
//! dedicated wire representation.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── gradebook-core/      # stable hashing, pagination, serde helpers
//! ├── gradebook-models/    # Student, Grade, Discipline, value objects, DTOs
//! ├── gradebook-db/        # schema descriptor, migrations, repository
//! └── gradebook-cli/       # seeding binary
//! ```
//!
//! The root crate re-exports the public surface:
//!
//! ```
//! use gradebook::{Discipline, Student};
//!
//! let student = Student::new("Hostettler", "Steve",
//!     chrono::NaiveDate::from_ymd_opt(1995, 4, 12).unwrap());
//! assert!(student.validate().is_ok());
//! assert_eq!(student.grades.len(), Discipline::ALL.len());
//! ```

pub use gradebook_core::hashing::{stable_hash_bytes, stable_hash_str};
pub use gradebook_core::pagination::{PaginationMeta, PaginationParams};
pub use gradebook_db::{PgPool, StudentRepository, init_db_pool, run_migrations, schema};
pub use gradebook_models::{
    Address, Badge, BadgeId, CreateStudentDto, Discipline, Gender, Grade, GradeId, PhoneNumber,
    Student, StudentId, StudentRecord, StudentValidationError, UnknownDiscipline, UpdateStudentDto,
    ValueTypeError,
};
