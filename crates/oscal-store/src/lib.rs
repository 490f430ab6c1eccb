//! oscal-store
//!
//! Persisted workspace records for the OSCAL SSP wizard.
//!
//! A record wraps a workspace snapshot payload with a surrogate id, a display
//! name, an optional owner and created/updated timestamps. Storage sits
//! behind [`WorkspaceStore`]:
//! - [`MemoryWorkspaceStore`]: process-local, for tests and ephemeral sessions
//! - [`SqliteWorkspaceStore`]: a single SQLite file (feature `sqlite`)

pub mod clock;
pub mod error;
pub mod memory;
pub mod record;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryWorkspaceStore;
pub use record::{sort_newest_first, validate_workspace_name, NewWorkspace, WorkspaceRecord, MAX_WORKSPACE_NAME_LEN};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWorkspaceStore;

/// Storage for workspace records.
pub trait WorkspaceStore: Send + Sync {
    /// All records, most recently updated first.
    fn list(&self) -> StoreResult<Vec<WorkspaceRecord>>;

    fn get(&self, id: &str) -> StoreResult<Option<WorkspaceRecord>>;

    /// Insert a new record under a fresh random id.
    fn create(&self, new: NewWorkspace) -> StoreResult<WorkspaceRecord>;

    /// Rename a record, mirroring the name into `data.system_name`.
    ///
    /// Returns `false` when no record has this id.
    fn rename(&self, id: &str, name: &str) -> StoreResult<bool>;

    /// Returns `false` when no record has this id.
    fn delete(&self, id: &str) -> StoreResult<bool>;
}
