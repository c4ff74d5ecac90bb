//! Content hashing for vendor cache keys
//!
//! The module hash identifies a dependency set: two checkouts with the same
//! `go.mod` and `go.sum` vendor the same tree, so the hash can key a cached
//! vendor archive.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the manifest bytes followed by the checksum bytes.
///
/// # Examples
/// ```
/// use gospace::application::hash::module_hash;
///
/// let a = module_hash(b"module example.com/app\n", b"");
/// assert_eq!(a.len(), 64);
/// assert_eq!(a, module_hash(b"module example.com/app\n", b""));
/// ```
pub fn module_hash(manifest: &[u8], sums: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(manifest);
    hasher.update(sums);
    hex::encode(hasher.finalize())
}
