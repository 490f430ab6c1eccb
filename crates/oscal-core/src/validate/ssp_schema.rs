//! Strict structural check of a raw SSP JSON document.
//!
//! The accepted shape is the JSON Schema in `ssp.schema.json` (unknown
//! fields rejected at every level). Each schema error becomes one finding
//! located by a dotted path such as `system-security-plan.metadata.roles.0.id`.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde_json::Value;

use super::Finding;
use crate::errors::{OscalError, OscalResult};
use crate::model::SspDocument;

const SSP_SCHEMA: &str = include_str!("ssp.schema.json");

const FIELD_REQUIRED: &str = "Field required";
const EXTRA_FIELD: &str = "Extra inputs are not permitted";
const NOT_AN_OBJECT: &str = "SSP JSON must be an object.";

fn ssp_validator() -> Result<&'static Validator, &'static str> {
    static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();
    VALIDATOR
        .get_or_init(|| {
            let schema: Value = serde_json::from_str(SSP_SCHEMA).map_err(|e| e.to_string())?;
            jsonschema::options().build(&schema).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(String::as_str)
}

/// Check a raw JSON value against the SSP document schema.
///
/// Returns one finding per violation, ordered by location; an empty list
/// means the document decodes as an [`SspDocument`].
pub fn validate_ssp_json(payload: &Value) -> Vec<Finding> {
    if !payload.is_object() {
        return vec![Finding::error(NOT_AN_OBJECT, "root")];
    }
    let validator = match ssp_validator() {
        Ok(v) => v,
        Err(e) => return vec![Finding::error(format!("SSP schema is unusable: {e}"), "root")],
    };

    let mut findings = Vec::new();
    for error in validator.iter_errors(payload) {
        let segments = pointer_segments(&error.instance_path.to_string());
        match &error.kind {
            ValidationErrorKind::Required { property } => {
                let name = property.as_str().map_or_else(|| property.to_string(), str::to_string);
                findings.push(Finding::error(FIELD_REQUIRED, location(&segments, Some(name.as_str()))));
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                for key in unexpected {
                    findings.push(Finding::error(EXTRA_FIELD, location(&segments, Some(key.as_str()))));
                }
            }
            _ => findings.push(Finding::error(error.to_string(), location(&segments, None))),
        }
    }
    findings.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.message.cmp(&b.message)));
    findings.dedup();
    findings
}

/// Read a file, decode it as JSON and check it against the SSP schema.
///
/// Unreadable files and invalid JSON are errors; a non-object top level is
/// a single `root` finding.
pub fn validate_ssp_file(path: &Path) -> OscalResult<Vec<Finding>> {
    let raw = fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&raw).map_err(|e| {
        OscalError::serialization(format!("invalid JSON in {}: {e}", path.display()))
    })?;
    Ok(validate_ssp_json(&payload))
}

/// Decode a raw JSON value into a typed SSP document, failing with every
/// finding folded into one error message.
pub fn parse_ssp_document(payload: &Value) -> OscalResult<SspDocument> {
    let findings = validate_ssp_json(payload);
    if !findings.is_empty() {
        let summary = findings
            .iter()
            .map(|f| format!("{}: {}", f.location, f.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(OscalError::invalid_argument(format!("invalid SSP document: {summary}")));
    }
    Ok(serde_json::from_value(payload.clone())?)
}

/// Split a JSON pointer (`/a/0/b`) into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

fn location(segments: &[String], leaf: Option<&str>) -> String {
    let mut parts: Vec<&str> = segments.iter().map(String::as_str).collect();
    parts.extend(leaf);
    if parts.is_empty() {
        "root".to_string()
    } else {
        parts.join(".")
    }
}
