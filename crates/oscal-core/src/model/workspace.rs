//! Workspace aggregate and its entities.
//!
//! Decoding is strict: unknown fields are rejected and enum-valued fields
//! only accept their documented spellings. After decoding, [`Workspace::check_fields`]
//! enforces the non-empty constraints. Both failures are hard errors; the
//! cross-entity invariants (unique ids, references, UUID syntax) are left to
//! `crate::validate` so that every problem can be reported at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{SUPPORTED_CONTENT_VERSION, SUPPORTED_OSCAL_VERSION};
use crate::errors::{OscalError, OscalResult};
use crate::ids::deterministic_uuid;

/// Outcome of an idempotent insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    AlreadyPresent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceMetadata {
    pub title: String,
    pub last_modified: String,
    pub version: String,
    pub oscal_version: String,
    pub content_version: String,
}

impl Default for WorkspaceMetadata {
    fn default() -> Self {
        Self {
            title: "System Security Plan".to_string(),
            last_modified: "1970-01-01T00:00:00Z".to_string(),
            version: "0.1.0".to_string(),
            oscal_version: SUPPORTED_OSCAL_VERSION.to_string(),
            content_version: SUPPORTED_CONTENT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub role_id: String,
    pub title: String,
}

impl Role {
    pub fn new(role_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Organization,
    Person,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Person => "person",
        }
    }

    pub fn parse(s: &str) -> OscalResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "organization" => Ok(Self::Organization),
            "person" => Ok(Self::Person),
            other => Err(OscalError::invalid_argument(format!(
                "unsupported party type: {other}"
            ))),
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Party {
    pub party_uuid: String,
    pub party_type: PartyType,
    pub name: String,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl Party {
    /// Build a party whose UUID is derived from its type, name and primary email.
    ///
    /// An empty `email` still participates in the derivation as an empty part.
    pub fn from_contact(party_type: PartyType, name: &str, email: &str) -> Self {
        let party_uuid = deterministic_uuid(&["party", party_type.as_str(), name, email]);
        Self {
            party_uuid,
            party_type,
            name: name.trim().to_string(),
            email_addresses: split_email_addresses(email),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponsibleParty {
    pub role_id: String,
    pub party_uuids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Component {
    pub component_uuid: String,
    pub component_type: String,
    pub title: String,
    pub description: String,
}

/// A component without an id yet, e.g. read from a component-definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDraft {
    pub component_type: String,
    pub title: String,
    pub description: String,
}

impl ComponentDraft {
    pub fn new(
        component_type: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            component_type: component_type.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Reject drafts with blank fields.
    pub fn check_fields(&self) -> OscalResult<()> {
        require_text("component_type", &self.component_type)?;
        require_text("title", &self.title)?;
        require_text("description", &self.description)
    }

    pub fn derive_uuid(&self) -> String {
        deterministic_uuid(&[
            "component",
            self.component_type.as_str(),
            self.title.as_str(),
            self.description.as_str(),
        ])
    }

    pub fn into_component(self) -> Component {
        Component {
            component_uuid: self.derive_uuid(),
            component_type: self.component_type,
            title: self.title,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemFoundation {
    pub system_uuid: String,
    pub system_name: String,
    pub impact_level: ImpactLevel,
    pub authorization_boundary: String,
    pub description: String,
    pub system_owner: String,
    pub authorizing_official: String,
}

/// Aggregate root for one SSP authoring session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Workspace {
    pub version: String,
    #[serde(default)]
    pub metadata: WorkspaceMetadata,
    pub system: SystemFoundation,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub responsible_parties: Vec<ResponsibleParty>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Workspace {
    /// Fresh workspace with default metadata and no entities.
    pub fn new(version: impl Into<String>, system: SystemFoundation) -> Self {
        Self {
            version: version.into(),
            metadata: WorkspaceMetadata::default(),
            system,
            roles: Vec::new(),
            parties: Vec::new(),
            responsible_parties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Strict decode from JSON text followed by field checks.
    pub fn from_json_str(s: &str) -> OscalResult<Self> {
        let ws: Workspace = serde_json::from_str(s)
            .map_err(|e| OscalError::serialization(format!("invalid workspace: {e}")))?;
        ws.check_fields()?;
        Ok(ws)
    }

    /// Strict decode from an already parsed JSON value followed by field checks.
    pub fn from_value(v: Value) -> OscalResult<Self> {
        let ws: Workspace = serde_json::from_value(v)
            .map_err(|e| OscalError::serialization(format!("invalid workspace: {e}")))?;
        ws.check_fields()?;
        Ok(ws)
    }

    /// Enforce the per-field non-empty constraints.
    pub fn check_fields(&self) -> OscalResult<()> {
        require_text("version", &self.version)?;

        let m = &self.metadata;
        require_text("metadata.title", &m.title)?;
        require_text("metadata.last_modified", &m.last_modified)?;
        require_text("metadata.version", &m.version)?;
        require_text("metadata.oscal_version", &m.oscal_version)?;
        require_text("metadata.content_version", &m.content_version)?;

        let s = &self.system;
        require_text("system.system_uuid", &s.system_uuid)?;
        require_text("system.system_name", &s.system_name)?;
        require_text("system.authorization_boundary", &s.authorization_boundary)?;
        require_text("system.description", &s.description)?;
        require_text("system.system_owner", &s.system_owner)?;
        require_text("system.authorizing_official", &s.authorizing_official)?;

        for (i, r) in self.roles.iter().enumerate() {
            require_text(&format!("roles[{i}].role_id"), &r.role_id)?;
            require_text(&format!("roles[{i}].title"), &r.title)?;
        }
        for (i, p) in self.parties.iter().enumerate() {
            require_text(&format!("parties[{i}].party_uuid"), &p.party_uuid)?;
            require_text(&format!("parties[{i}].name"), &p.name)?;
        }
        for (i, rp) in self.responsible_parties.iter().enumerate() {
            require_text(&format!("responsible_parties[{i}].role_id"), &rp.role_id)?;
            if rp.party_uuids.is_empty() {
                return Err(OscalError::invalid_argument(format!(
                    "responsible_parties[{i}].party_uuids must not be empty"
                )));
            }
        }
        for (i, c) in self.components.iter().enumerate() {
            require_text(&format!("components[{i}].component_uuid"), &c.component_uuid)?;
            require_text(&format!("components[{i}].component_type"), &c.component_type)?;
            require_text(&format!("components[{i}].title"), &c.title)?;
            require_text(&format!("components[{i}].description"), &c.description)?;
        }
        Ok(())
    }

    pub fn add_role(&mut self, role: Role) {
        self.roles.push(role);
    }

    /// Append a party unless one with the same UUID already exists.
    pub fn add_party(&mut self, party: Party) -> Upsert {
        if self.parties.iter().any(|p| p.party_uuid == party.party_uuid) {
            return Upsert::AlreadyPresent;
        }
        self.parties.push(party);
        Upsert::Inserted
    }

    pub fn add_responsible_party(&mut self, role_id: impl Into<String>, party_uuids: Vec<String>) -> OscalResult<()> {
        if party_uuids.is_empty() {
            return Err(OscalError::invalid_argument(
                "responsible party requires at least one party",
            ));
        }
        self.responsible_parties.push(ResponsibleParty {
            role_id: role_id.into(),
            party_uuids,
        });
        Ok(())
    }

    /// Promote a draft and append it unless its derived UUID already exists.
    pub fn add_component(&mut self, draft: ComponentDraft) -> OscalResult<Upsert> {
        draft.check_fields()?;
        let component = draft.into_component();
        if self.has_component(&component.component_uuid) {
            return Ok(Upsert::AlreadyPresent);
        }
        self.components.push(component);
        Ok(Upsert::Inserted)
    }

    pub fn has_component(&self, component_uuid: &str) -> bool {
        self.components.iter().any(|c| c.component_uuid == component_uuid)
    }
}

/// Split a comma-separated email field, dropping blanks.
pub fn split_email_addresses(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn require_text(field: &str, value: &str) -> OscalResult<()> {
    if value.trim().is_empty() {
        return Err(OscalError::invalid_argument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
