//! Workspace record types and name rules.

use oscal_core::model::WorkspaceSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::{StoreError, StoreResult};

/// Longest accepted workspace name, in characters.
pub const MAX_WORKSPACE_NAME_LEN: usize = 200;

/// One stored workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub id: String,
    pub name: String,
    pub system_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Snapshot payload (`system_name`, `system_id`, `created_at`).
    pub data: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl WorkspaceRecord {
    /// Decode the stored payload back into a snapshot.
    pub fn snapshot(&self) -> StoreResult<WorkspaceSnapshot> {
        let payload = self.data.as_object().ok_or_else(|| {
            StoreError::Core(oscal_core::OscalError::invariant(format!(
                "workspace {} data is not an object",
                self.id
            )))
        })?;
        Ok(WorkspaceSnapshot::from_payload(payload)?)
    }
}

/// Input for [`crate::WorkspaceStore::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkspace {
    pub name: String,
    pub system_id: String,
    pub owner_id: Option<String>,
    pub data: Value,
    /// Defaults to the store clock's current time.
    pub created_at: Option<OffsetDateTime>,
}

impl NewWorkspace {
    /// Record input carrying a snapshot's export payload.
    pub fn from_snapshot(snapshot: &WorkspaceSnapshot) -> StoreResult<Self> {
        Ok(Self {
            name: snapshot.system_name.clone(),
            system_id: snapshot.system_id.clone(),
            owner_id: None,
            data: snapshot.to_export_payload()?,
            created_at: Some(snapshot.created_at),
        })
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }
}

/// Trim and check a workspace name.
pub fn validate_workspace_name(name: &str) -> StoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidName("Workspace name is required.".to_string()));
    }
    if name.chars().count() > MAX_WORKSPACE_NAME_LEN {
        return Err(StoreError::InvalidName(format!(
            "Workspace name must be at most {MAX_WORKSPACE_NAME_LEN} characters."
        )));
    }
    Ok(name.to_string())
}

/// Newest `updated_at` first; ties broken by newest `created_at`, then id.
pub fn sort_newest_first(records: &mut [WorkspaceRecord]) {
    records.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// `data` with `system_name` replaced, when `data` is an object.
pub(crate) fn rename_data(data: &Value, name: &str) -> Value {
    let mut data = data.clone();
    if let Value::Object(map) = &mut data {
        map.insert("system_name".to_string(), Value::String(name.to_string()));
    }
    data
}
