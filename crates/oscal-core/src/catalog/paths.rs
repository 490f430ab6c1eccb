use std::path::{Path, PathBuf};

use tracing::debug;

use super::loader::{load_catalog_controls, select_controls_by_prefix, ControlSummary};
use super::manifest::{load_manifest, CatalogManifestEntry};
use crate::errors::OscalResult;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Location of downloaded catalog data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub data_dir: PathBuf,
}

impl CatalogPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(MANIFEST_FILE_NAME)
    }

    pub fn entry_path(&self, entry: &CatalogManifestEntry) -> PathBuf {
        self.data_dir.join(Path::new(&entry.filename))
    }
}

/// Controls of the first manifest catalog matching `prefix`, at most `limit`.
///
/// A missing manifest or a manifest without a catalog entry yields an empty
/// list. A present but broken manifest or catalog is an error.
pub fn load_control_subset(paths: &CatalogPaths, prefix: &str, limit: usize) -> OscalResult<Vec<ControlSummary>> {
    let manifest_path = paths.manifest_path();
    if !manifest_path.exists() {
        debug!(path = %manifest_path.display(), "no catalog manifest");
        return Ok(Vec::new());
    }

    let manifest = load_manifest(&manifest_path)?;
    let Some(entry) = manifest.first_catalog() else {
        debug!("manifest has no catalog entry");
        return Ok(Vec::new());
    };

    let controls = load_catalog_controls(&paths.entry_path(entry))?;
    Ok(select_controls_by_prefix(&controls, prefix, limit))
}
