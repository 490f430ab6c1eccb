//! In-memory workspace store.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::record::{rename_data, sort_newest_first, validate_workspace_name, NewWorkspace, WorkspaceRecord};
use crate::WorkspaceStore;

pub struct MemoryWorkspaceStore {
    records: RwLock<Vec<WorkspaceRecord>>,
    clock: Arc<dyn Clock>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for MemoryWorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceStore for MemoryWorkspaceStore {
    fn list(&self) -> StoreResult<Vec<WorkspaceRecord>> {
        let mut out = self.records.read().clone();
        sort_newest_first(&mut out);
        Ok(out)
    }

    fn get(&self, id: &str) -> StoreResult<Option<WorkspaceRecord>> {
        Ok(self.records.read().iter().find(|r| r.id == id).cloned())
    }

    fn create(&self, new: NewWorkspace) -> StoreResult<WorkspaceRecord> {
        let name = validate_workspace_name(&new.name)?;
        let now = self.clock.now();
        let record = WorkspaceRecord {
            id: Uuid::new_v4().to_string(),
            name,
            system_id: new.system_id,
            owner_id: new.owner_id,
            data: new.data,
            created_at: new.created_at.unwrap_or(now),
            updated_at: now,
        };
        self.records.write().push(record.clone());
        Ok(record)
    }

    fn rename(&self, id: &str, name: &str) -> StoreResult<bool> {
        let name = validate_workspace_name(name)?;
        let now = self.clock.now();
        let mut records = self.records.write();
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.data = rename_data(&record.data, &name);
        record.name = name;
        record.updated_at = now;
        Ok(true)
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}
