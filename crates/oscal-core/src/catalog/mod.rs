//! Catalog loading for control selection.
//!
//! - [`loader`]: flattens a nested OSCAL catalog into sorted control summaries.
//! - [`manifest`]: the manifest describing downloaded catalog/profile files.
//! - [`paths`]: where catalog data lives and the manifest-driven control subset.

pub mod loader;
pub mod manifest;
pub mod paths;

pub use loader::{controls_from_catalog, load_catalog_controls, select_controls_by_prefix, ControlSummary};
pub use manifest::{dump_manifest, load_manifest, verify_entry_digest, CatalogKind, CatalogManifest, CatalogManifestEntry};
pub use paths::{load_control_subset, CatalogPaths, MANIFEST_FILE_NAME};
