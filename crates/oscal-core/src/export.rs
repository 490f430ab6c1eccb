//! Export and import projections.
//!
//! - [`export_ssp_json`]: workspace → OSCAL SSP document, pretty canonical JSON.
//! - [`workspace_to_canonical_json`]: the workspace itself, pretty canonical JSON.
//! - [`export_workspace`] / [`import_workspace`]: the compact `{"workspace": {...}}`
//!   snapshot envelope used to move workspaces between installations.
//!
//! Export assumes a workspace that already passed construction checks; it
//! is a renaming projection and performs no validation of its own.

use serde_json::{Map, Value};

use crate::canonical::{canonical_json, canonical_json_bytes, CanonicalMode};
use crate::errors::{OscalError, OscalResult};
use crate::model::{
    AuthorizationBoundary, SspComponent, SspDocument, SspMetadata, SspParty, SspResponsibleParty,
    SspRole, SystemCharacteristics, SystemImplementation, SystemSecurityPlan, Workspace,
    WorkspaceSnapshot,
};

/// Envelope key of the snapshot export format.
pub const WORKSPACE_ENVELOPE_KEY: &str = "workspace";

/// Map a workspace onto the external SSP document shape.
pub fn build_ssp(workspace: &Workspace) -> SspDocument {
    let roles = workspace
        .roles
        .iter()
        .map(|r| SspRole {
            id: r.role_id.clone(),
            title: r.title.clone(),
        })
        .collect();

    let parties = workspace
        .parties
        .iter()
        .map(|p| SspParty {
            uuid: p.party_uuid.clone(),
            party_type: p.party_type.as_str().to_string(),
            name: p.name.clone(),
            email_addresses: p.email_addresses.clone(),
        })
        .collect();

    let responsible_parties = workspace
        .responsible_parties
        .iter()
        .map(|rp| SspResponsibleParty {
            role_id: rp.role_id.clone(),
            party_uuids: rp.party_uuids.clone(),
        })
        .collect();

    let components = workspace
        .components
        .iter()
        .map(|c| SspComponent {
            uuid: c.component_uuid.clone(),
            component_type: c.component_type.clone(),
            title: c.title.clone(),
            description: c.description.clone(),
        })
        .collect();

    let m = &workspace.metadata;
    let s = &workspace.system;

    SspDocument {
        system_security_plan: SystemSecurityPlan {
            uuid: s.system_uuid.clone(),
            metadata: SspMetadata {
                title: m.title.clone(),
                last_modified: m.last_modified.clone(),
                version: m.version.clone(),
                oscal_version: m.oscal_version.clone(),
                roles,
                parties,
                responsible_parties,
            },
            system_characteristics: SystemCharacteristics {
                system_name: s.system_name.clone(),
                description: s.description.clone(),
                security_sensitivity_level: s.impact_level.as_str().to_string(),
                authorization_boundary: AuthorizationBoundary {
                    description: s.authorization_boundary.clone(),
                },
            },
            system_implementation: SystemImplementation { components },
        },
    }
}

/// SSP export as pretty canonical JSON.
pub fn export_ssp_json(workspace: &Workspace) -> OscalResult<String> {
    canonical_json(&build_ssp(workspace))
}

/// The workspace aggregate as pretty canonical JSON.
pub fn workspace_to_canonical_json(workspace: &Workspace) -> OscalResult<String> {
    canonical_json(workspace)
}

/// Snapshot export: `{"workspace": {...}}` in compact canonical form.
pub fn export_workspace(snapshot: &WorkspaceSnapshot) -> OscalResult<Vec<u8>> {
    let mut envelope = Map::new();
    envelope.insert(WORKSPACE_ENVELOPE_KEY.to_string(), snapshot.to_export_payload()?);
    canonical_json_bytes(&Value::Object(envelope), CanonicalMode::Compact)
}

/// Snapshot import from raw file bytes.
///
/// Accepts the `{"workspace": {...}}` envelope written by [`export_workspace`]
/// as well as a bare snapshot object.
pub fn import_workspace(bytes: &[u8]) -> OscalResult<WorkspaceSnapshot> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(OscalError::invalid_argument("Workspace file is empty."));
    }
    let payload: Value = serde_json::from_slice(bytes)
        .map_err(|e| OscalError::serialization(format!("Workspace file is not valid JSON: {e}")))?;

    let obj = payload
        .as_object()
        .ok_or_else(|| OscalError::invalid_argument("Workspace JSON must be an object."))?;

    let inner = match obj.get(WORKSPACE_ENVELOPE_KEY) {
        Some(Value::Object(inner)) => inner,
        Some(_) => {
            return Err(OscalError::invalid_argument(
                "Workspace envelope must contain an object.",
            ))
        }
        None => obj,
    };

    WorkspaceSnapshot::from_payload(inner)
}
