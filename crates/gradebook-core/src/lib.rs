//! # Gradebook Core
//!
//! Shared utilities for the gradebook workspace:
//!
//! - [`hashing`]: stable, memory-independent field hashing
//! - [`pagination`]: pagination parameters and response metadata
//! - [`serde`]: custom serde deserialization helpers

pub mod hashing;
pub mod pagination;
pub mod serde;

// Re-export commonly used items at crate root
pub use hashing::{stable_hash_bytes, stable_hash_str};
pub use pagination::{PaginationMeta, PaginationParams};
