//! Deterministic, content-derived identifiers.
//!
//! Re-submitting the same logical entity must yield the same identifier so
//! that the wizard can detect duplicates with a plain membership test:
//! - [`deterministic_id`]: first 32 hex chars of SHA-256 over the seed.
//! - [`deterministic_uuid`]: UUIDv5 over the normalized parts joined by `|`.
//!
//! The 32-char truncation keeps 128 bits of the digest. That is enough for
//! non-adversarial collision avoidance and is part of the stored format.

use uuid::Uuid;

use crate::hash::hash_bytes_hex;

/// Number of hex characters kept from the SHA-256 digest.
pub const DETERMINISTIC_ID_LEN: usize = 32;

/// Separator placed between normalized parts before UUIDv5 hashing.
pub const PART_SEPARATOR: &str = "|";

/// Stable short identifier derived from `seed`.
pub fn deterministic_id(seed: &str) -> String {
    let mut digest = hash_bytes_hex(seed.as_bytes());
    digest.truncate(DETERMINISTIC_ID_LEN);
    digest
}

/// UUIDv5 in the standard URL namespace over the normalized `parts`.
pub fn deterministic_uuid<S: AsRef<str>>(parts: &[S]) -> String {
    deterministic_uuid_in(&Uuid::NAMESPACE_URL, parts)
}

/// UUIDv5 in an explicit namespace over the normalized `parts`.
pub fn deterministic_uuid_in<S: AsRef<str>>(namespace: &Uuid, parts: &[S]) -> String {
    let name = parts
        .iter()
        .map(|p| normalize_part(p.as_ref()))
        .collect::<Vec<_>>()
        .join(PART_SEPARATOR);
    Uuid::new_v5(namespace, name.as_bytes()).to_string()
}

/// Per-part normalization: trim surrounding whitespace, lowercase.
pub fn normalize_part(part: &str) -> String {
    part.trim().to_lowercase()
}
