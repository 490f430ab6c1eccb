//! Parsing helpers for wizard inputs.
//!
//! Helpers here operate on in-memory bytes and JSON values:
//! - strict JSON parsing with size limits
//! - document kind detection (workspace, snapshot, SSP, catalog, component definition)
//! - typed decoding of workspace bytes
//!
//! Callers pass explicit limits (see [`crate::config::LimitsConfig`]).

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{OscalError, OscalResult};
use crate::export::WORKSPACE_ENVELOPE_KEY;
use crate::model::Workspace;

/// Default maximum JSON bytes accepted by helpers (8 MiB).
pub const DEFAULT_MAX_JSON_BYTES: usize = 8 * 1024 * 1024;

/// Document classification for files handed to the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Workspace,
    WorkspaceSnapshot,
    Ssp,
    Catalog,
    ComponentDefinition,
    Unknown,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::WorkspaceSnapshot => "workspace-snapshot",
            Self::Ssp => "ssp",
            Self::Catalog => "catalog",
            Self::ComponentDefinition => "component-definition",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse JSON bytes into `serde_json::Value` with a hard size limit.
pub fn parse_json_bytes(bytes: &[u8], max_bytes: usize) -> OscalResult<Value> {
    if bytes.len() > max_bytes {
        return Err(OscalError::invalid_argument(format!(
            "JSON payload too large ({} bytes > limit {})",
            bytes.len(),
            max_bytes
        )));
    }

    serde_json::from_slice(bytes)
        .map_err(|e| OscalError::serialization(format!("failed to parse JSON: {e}")))
}

/// Detect the document kind from parsed JSON.
///
/// Heuristics, checked in order:
/// - SSP: has `system-security-plan`
/// - catalog: has `catalog`
/// - component definition: has `component-definition`
/// - snapshot: has a `workspace` envelope, or `system_name` + `system_id`
/// - workspace: has `system` and `version`
pub fn detect_kind(v: &Value) -> DocumentKind {
    let Some(obj) = v.as_object() else {
        return DocumentKind::Unknown;
    };

    if obj.contains_key("system-security-plan") {
        return DocumentKind::Ssp;
    }
    if obj.contains_key("catalog") {
        return DocumentKind::Catalog;
    }
    if obj.contains_key("component-definition") {
        return DocumentKind::ComponentDefinition;
    }

    let enveloped = obj.get(WORKSPACE_ENVELOPE_KEY).map_or(false, Value::is_object);
    if enveloped || (obj.contains_key("system_name") && obj.contains_key("system_id")) {
        return DocumentKind::WorkspaceSnapshot;
    }

    if obj.get("system").map_or(false, Value::is_object) && obj.contains_key("version") {
        return DocumentKind::Workspace;
    }

    DocumentKind::Unknown
}

/// Parse bytes into a checked [`Workspace`].
pub fn parse_workspace_bytes(bytes: &[u8], max_bytes: usize) -> OscalResult<Workspace> {
    let v = parse_json_bytes(bytes, max_bytes)?;
    if !v.is_object() {
        return Err(OscalError::invalid_argument("Workspace JSON must be an object."));
    }
    Workspace::from_value(v)
}
