//! External OSCAL SSP document shape.
//!
//! Wire names are hyphenated (`last-modified`, `role-id`, ...). Unknown
//! fields are rejected at every level.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SspDocument {
    pub system_security_plan: SystemSecurityPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemSecurityPlan {
    pub uuid: String,
    pub metadata: SspMetadata,
    pub system_characteristics: SystemCharacteristics,
    pub system_implementation: SystemImplementation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SspMetadata {
    pub title: String,
    pub last_modified: String,
    pub version: String,
    pub oscal_version: String,
    pub roles: Vec<SspRole>,
    pub parties: Vec<SspParty>,
    pub responsible_parties: Vec<SspResponsibleParty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SspRole {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SspParty {
    pub uuid: String,
    #[serde(rename = "type")]
    pub party_type: String,
    pub name: String,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SspResponsibleParty {
    pub role_id: String,
    pub party_uuids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemCharacteristics {
    pub system_name: String,
    pub description: String,
    pub security_sensitivity_level: String,
    pub authorization_boundary: AuthorizationBoundary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AuthorizationBoundary {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemImplementation {
    pub components: Vec<SspComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SspComponent {
    pub uuid: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub title: String,
    pub description: String,
}
