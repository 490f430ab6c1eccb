//! Workspace and SSP validation.
//!
//! Validation never fails for data problems. Every issue becomes a
//! [`Finding`]; an empty list means the input is valid. All checks run
//! independently so a caller sees every problem in one pass.
//!
//! Workspace checks, in order:
//! 1. `metadata.oscal_version` is the supported OSCAL version
//! 2. `metadata.content_version` is the supported content version
//! 3. role ids and party uuids are unique (each duplicate value reported once, sorted)
//! 4. `system_uuid`, every `party_uuid` and every `component_uuid` parse as UUIDs
//! 5. responsible parties reference existing roles and parties

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::model::Workspace;

mod ssp_schema;

pub use ssp_schema::{parse_ssp_document, validate_ssp_file, validate_ssp_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation issue. `location` is a dotted path into the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    pub location: String,
}

impl Finding {
    pub fn error(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.location, self.message)
    }
}

/// Validate a workspace against the default configuration.
pub fn validate_workspace(workspace: &Workspace) -> Vec<Finding> {
    validate_workspace_with(workspace, &CoreConfig::default())
}

/// Validate a workspace against an explicit configuration.
pub fn validate_workspace_with(workspace: &Workspace, cfg: &CoreConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if workspace.metadata.oscal_version != cfg.versions.oscal_version {
        findings.push(Finding::error(
            "Unsupported OSCAL version.",
            "metadata.oscal_version",
        ));
    }

    if workspace.metadata.content_version != cfg.versions.content_version {
        findings.push(Finding::error(
            "Unsupported OSCAL content version.",
            "metadata.content_version",
        ));
    }

    findings.extend(duplicate_ids(
        "roles",
        workspace.roles.iter().map(|r| r.role_id.as_str()),
    ));
    findings.extend(duplicate_ids(
        "parties",
        workspace.parties.iter().map(|p| p.party_uuid.as_str()),
    ));

    findings.extend(invalid_uuids(
        "system.system_uuid",
        std::iter::once(workspace.system.system_uuid.as_str()),
    ));
    findings.extend(invalid_uuids(
        "parties.party_uuid",
        workspace.parties.iter().map(|p| p.party_uuid.as_str()),
    ));
    findings.extend(invalid_uuids(
        "components.component_uuid",
        workspace.components.iter().map(|c| c.component_uuid.as_str()),
    ));

    let role_ids: BTreeSet<&str> = workspace.roles.iter().map(|r| r.role_id.as_str()).collect();
    let party_ids: BTreeSet<&str> = workspace
        .parties
        .iter()
        .map(|p| p.party_uuid.as_str())
        .collect();

    for rp in &workspace.responsible_parties {
        if !role_ids.contains(rp.role_id.as_str()) {
            findings.push(Finding::error(
                "Responsible party references unknown role.",
                format!("responsible_parties.{}", rp.role_id),
            ));
        }
        for party_uuid in &rp.party_uuids {
            if !party_ids.contains(party_uuid.as_str()) {
                findings.push(Finding::error(
                    "Responsible party references unknown party.",
                    format!("responsible_parties.{party_uuid}"),
                ));
            }
        }
    }

    findings
}

/// True when `value` parses as a UUID (hyphenated, simple, braced or urn form).
pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

fn duplicate_ids<'a>(location: &str, values: impl Iterator<Item = &'a str>) -> Vec<Finding> {
    values
        .duplicates()
        .sorted()
        .map(|value| Finding::error("Duplicate identifier.", format!("{location}.{value}")))
        .collect()
}

fn invalid_uuids<'a>(location: &str, values: impl Iterator<Item = &'a str>) -> Vec<Finding> {
    values
        .filter(|v| !is_valid_uuid(v))
        .map(|_| Finding::error("Invalid UUID.", location))
        .collect()
}
