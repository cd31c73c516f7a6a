//! Stable, memory-independent field hashing.
//!
//! The standard library's hashers are randomly keyed per process, which makes
//! them unusable for identity values that must be reproducible across runs
//! (transient record keys, for instance). The helpers here derive an `i64`
//! from SHA-256, so the same input always hashes to the same value on every
//! platform.

use sha2::{Digest, Sha256};

/// Hashes raw bytes to a stable `i64`.
///
/// The value is the big-endian interpretation of the first eight bytes of
/// the SHA-256 digest. Collisions are possible but no more likely than with
/// any other 64-bit hash.
pub fn stable_hash_bytes(bytes: &[u8]) -> i64 {
    let digest = Sha256::digest(bytes);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(prefix)
}

/// Hashes a string slice to a stable `i64`.
#[inline]
pub fn stable_hash_str(s: &str) -> i64 {
    stable_hash_bytes(s.as_bytes())
}
