//! Canonical serialization for graph identities and fingerprints.
//!
//! Asset keys are identified throughout the kernel by the compact JSON
//! encoding of their path segments. The same encoding feeds the xxh64
//! fingerprints used to tell two graph snapshots apart.
//!
//! ## Determinism Guarantees
//!
//! - Stable Vec order: path segments serialize in index order
//! - No HashMap allowed: Use BTreeMap for maps in hashed data
//! - Compact output: no whitespace, so equal paths give equal strings

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Encode path segments as a compact JSON array string.
///
/// `["a", "b"]` becomes `["a","b"]`. Order is preserved, and the JSON string
/// escaping keeps segments containing `,` or `"` from colliding.
pub fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
    let segments: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
    serde_json::to_string(&segments).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    let bytes = to_canonical_bytes(value);
    xxh64(&bytes, 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}
