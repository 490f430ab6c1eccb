//! Configuration structures for oscal-core.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller (CLI flags, service settings).

use crate::errors::{OscalError, OscalResult};

/// OSCAL schema version the exporter targets.
pub const SUPPORTED_OSCAL_VERSION: &str = "1.2.0";

/// OSCAL content (catalog/profile) version the wizard is built against.
pub const SUPPORTED_CONTENT_VERSION: &str = "1.4.0";

/// Default manifest schema version written by the catalog fetcher.
pub const MANIFEST_SCHEMA_VERSION: &str = "1.0.0";

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    pub versions: SupportedVersions,
    pub limits: LimitsConfig,
}

/// Versions a workspace's metadata must carry to pass validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedVersions {
    pub oscal_version: String,
    pub content_version: String,
}

impl Default for SupportedVersions {
    fn default() -> Self {
        Self {
            oscal_version: SUPPORTED_OSCAL_VERSION.to_string(),
            content_version: SUPPORTED_CONTENT_VERSION.to_string(),
        }
    }
}

/// Resource limits applied when parsing caller-supplied bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    pub max_json_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_json_bytes: crate::parse::DEFAULT_MAX_JSON_BYTES,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> OscalResult<()> {
    if cfg.versions.oscal_version.trim().is_empty() {
        return Err(OscalError::invalid_argument(
            "oscal_version must not be empty",
        ));
    }

    if cfg.versions.content_version.trim().is_empty() {
        return Err(OscalError::invalid_argument(
            "content_version must not be empty",
        ));
    }

    if cfg.limits.max_json_bytes == 0 {
        return Err(OscalError::invalid_argument(
            "max_json_bytes must be greater than zero",
        ));
    }

    Ok(())
}
