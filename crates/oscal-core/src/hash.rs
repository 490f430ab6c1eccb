//! Deterministic hashing utilities.
//!
//! All digests are SHA-256, rendered as lowercase hex. Content-addressed
//! hashes of JSON values always go through the compact canonical form so
//! that key order and whitespace never influence the digest.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical::{canonical_json_bytes, CanonicalMode};
use crate::errors::OscalResult;

/// Hash raw bytes with SHA-256.
pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&h.finalize());
    out
}

/// Hash raw bytes and return lowercase hex string.
pub fn hash_bytes_hex(bytes: &[u8]) -> String {
    hex::encode(hash_bytes(bytes))
}

/// Hash the compact canonical JSON encoding of a value.
pub fn hash_canonical_json_hex<T: Serialize + ?Sized>(value: &T) -> OscalResult<String> {
    let bytes = canonical_json_bytes(value, CanonicalMode::Compact)?;
    Ok(hash_bytes_hex(&bytes))
}

/// Compare two hex digests ignoring case.
pub fn digest_matches(expected_hex: &str, actual_hex: &str) -> bool {
    expected_hex.trim().eq_ignore_ascii_case(actual_hex.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hash_bytes_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = json!({"b": 1, "a": [1, 2]});
        let b = json!({"a": [1, 2], "b": 1});
        assert_eq!(
            hash_canonical_json_hex(&a).unwrap(),
            hash_canonical_json_hex(&b).unwrap()
        );
    }

    #[test]
    fn digest_compare_is_case_insensitive() {
        assert!(digest_matches("ABCDEF", "abcdef"));
        assert!(!digest_matches("abcdef", "abcdee"));
    }
}
