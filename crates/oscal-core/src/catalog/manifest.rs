use std::fs;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_json;
use crate::config::MANIFEST_SCHEMA_VERSION;
use crate::errors::{OscalError, OscalResult};
use crate::hash::{digest_matches, hash_bytes_hex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Catalog,
    Profile,
}

/// One downloaded catalog or profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifestEntry {
    pub kind: CatalogKind,
    pub title: String,
    pub filename: String,
    pub version: String,
    pub sha256: String,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub items: Vec<CatalogManifestEntry>,
}

fn default_schema_version() -> String {
    MANIFEST_SCHEMA_VERSION.to_string()
}

impl CatalogManifest {
    pub fn new(items: Vec<CatalogManifestEntry>) -> Self {
        Self {
            schema_version: default_schema_version(),
            items,
        }
    }

    /// First entry of kind `catalog`, if any.
    pub fn first_catalog(&self) -> Option<&CatalogManifestEntry> {
        self.items.iter().find(|e| e.kind == CatalogKind::Catalog)
    }

    /// Every entry string must be non-empty.
    pub fn check_fields(&self) -> OscalResult<()> {
        for (i, e) in self.items.iter().enumerate() {
            for (field, value) in [
                ("title", &e.title),
                ("filename", &e.filename),
                ("version", &e.version),
                ("sha256", &e.sha256),
                ("source_url", &e.source_url),
            ] {
                if value.is_empty() {
                    return Err(OscalError::invalid_argument(format!(
                        "items[{i}].{field} must not be empty"
                    )));
                }
            }
            if !is_contained_file_name(&e.filename) {
                return Err(OscalError::invalid_argument(format!(
                    "items[{i}].filename must be a relative path inside the catalog directory"
                )));
            }
        }
        Ok(())
    }
}

/// Relative path made only of normal segments (no root, prefix or `..`).
fn is_contained_file_name(filename: &str) -> bool {
    Path::new(filename)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Read and strictly decode a manifest file.
pub fn load_manifest(path: &Path) -> OscalResult<CatalogManifest> {
    let raw = fs::read(path)?;
    let manifest: CatalogManifest = serde_json::from_slice(&raw).map_err(|e| {
        OscalError::serialization(format!("invalid manifest {}: {e}", path.display()))
    })?;
    manifest.check_fields()?;
    Ok(manifest)
}

/// Manifest as pretty canonical JSON.
pub fn dump_manifest(manifest: &CatalogManifest) -> OscalResult<String> {
    canonical_json(manifest)
}

/// Check downloaded bytes against the digest recorded in the manifest.
pub fn verify_entry_digest(entry: &CatalogManifestEntry, bytes: &[u8]) -> OscalResult<()> {
    let actual = hash_bytes_hex(bytes);
    if !digest_matches(&entry.sha256, &actual) {
        return Err(OscalError::invariant(format!(
            "sha256 mismatch for {}: manifest {}, file {actual}",
            entry.filename, entry.sha256
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn entry(kind: CatalogKind, filename: &str) -> CatalogManifestEntry {
        CatalogManifestEntry {
            kind,
            title: "NIST SP 800-53".to_string(),
            filename: filename.to_string(),
            version: "5.1.1".to_string(),
            sha256: hash_bytes_hex(b"{}"),
            source_url: "https://example.invalid/catalog.json".to_string(),
        }
    }

    #[test]
    fn first_catalog_skips_profiles() {
        let m = CatalogManifest::new(vec![
            entry(CatalogKind::Profile, "profile.json"),
            entry(CatalogKind::Catalog, "catalog.json"),
        ]);
        assert_eq!(m.first_catalog().unwrap().filename, "catalog.json");
        assert!(CatalogManifest::new(vec![]).first_catalog().is_none());
    }

    #[test]
    fn dump_is_sorted_and_defaults_schema_version() {
        let m = CatalogManifest::new(vec![entry(CatalogKind::Catalog, "c.json")]);
        let text = dump_manifest(&m).unwrap();
        assert!(text.starts_with("{\n  \"items\": [\n"));
        assert!(text.contains("\"schema_version\": \"1.0.0\""));
        assert!(text.contains("\"kind\": \"catalog\""));
    }

    #[test]
    fn load_rejects_unknown_fields_and_empty_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        fs::write(&path, r#"{"items": [], "extra": 1}"#).unwrap();
        assert_matches!(load_manifest(&path), Err(OscalError::Serialization(_)));

        fs::write(
            &path,
            r#"{"items": [{"kind": "catalog", "title": "", "filename": "c.json",
                "version": "1", "sha256": "ab", "source_url": "u"}]}"#,
        )
        .unwrap();
        let err = load_manifest(&path).unwrap_err();
        assert_eq!(err.to_string(), "items[0].title must not be empty");

        fs::write(&path, r#"{"items": []}"#).unwrap();
        assert_eq!(load_manifest(&path).unwrap().schema_version, "1.0.0");
    }

    #[test]
    fn filenames_must_stay_inside_data_dir() {
        for bad in ["../catalog.json", "nested/../../catalog.json", "/etc/catalog.json"] {
            let m = CatalogManifest::new(vec![entry(CatalogKind::Catalog, bad)]);
            let err = m.check_fields().unwrap_err();
            assert_eq!(
                err.to_string(),
                "items[0].filename must be a relative path inside the catalog directory",
                "{bad}"
            );
        }
        let ok = CatalogManifest::new(vec![entry(CatalogKind::Catalog, "nist/catalog.json")]);
        assert!(ok.check_fields().is_ok());
    }

    #[test]
    fn digest_verification() {
        let mut e = entry(CatalogKind::Catalog, "c.json");
        assert!(verify_entry_digest(&e, b"{}").is_ok());
        e.sha256 = e.sha256.to_uppercase();
        assert!(verify_entry_digest(&e, b"{}").is_ok());
        assert_matches!(verify_entry_digest(&e, b"[]"), Err(OscalError::Invariant(_)));
    }
}
