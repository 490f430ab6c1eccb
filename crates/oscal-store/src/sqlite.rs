//! SQLite-backed workspace store.
//!
//! One `workspaces` table; `data` holds the snapshot payload as JSON text and
//! timestamps are RFC 3339 strings in UTC.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::debug;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::record::{rename_data, sort_newest_first, validate_workspace_name, NewWorkspace, WorkspaceRecord};
use crate::WorkspaceStore;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// File name of the database inside a store root directory.
pub const DATABASE_FILE_NAME: &str = "workspaces.db";

const SELECT_COLUMNS: &str = "id, name, system_id, owner_id, data, created_at, updated_at";

/// Raw column values; decoded outside the rusqlite row closure.
type RawRow = (String, String, String, Option<String>, String, String, String);

pub struct SqliteWorkspaceStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
}

impl SqliteWorkspaceStore {
    /// Open or create the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    pub fn open_with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        debug!(path = %path.display(), "workspace store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
            clock,
        })
    }

    /// Open `<root>/workspaces.db`, creating `root` if needed.
    pub fn open_in_dir(root: impl AsRef<Path>, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        Self::open_with_clock(root.join(DATABASE_FILE_NAME), clock)
    }

    pub fn in_memory() -> StoreResult<Self> {
        Self::in_memory_with_clock(Arc::new(SystemClock))
    }

    pub fn in_memory_with_clock(clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
            clock,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn decode(raw: RawRow) -> StoreResult<WorkspaceRecord> {
    let (id, name, system_id, owner_id, data, created_at, updated_at) = raw;
    Ok(WorkspaceRecord {
        id,
        name,
        system_id,
        owner_id,
        data: serde_json::from_str(&data)?,
        created_at: OffsetDateTime::parse(&created_at, &Rfc3339)?,
        updated_at: OffsetDateTime::parse(&updated_at, &Rfc3339)?,
    })
}

fn encode_ts(ts: OffsetDateTime) -> StoreResult<String> {
    Ok(ts.to_offset(UtcOffset::UTC).format(&Rfc3339)?)
}

impl WorkspaceStore for SqliteWorkspaceStore {
    fn list(&self) -> StoreResult<Vec<WorkspaceRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM workspaces"))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = rows.into_iter().map(decode).collect::<StoreResult<Vec<_>>>()?;
        sort_newest_first(&mut out);
        Ok(out)
    }

    fn get(&self, id: &str) -> StoreResult<Option<WorkspaceRecord>> {
        let conn = self.conn.lock();
        let raw = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM workspaces WHERE id = ?1"),
                params![id],
                read_row,
            )
            .optional()?;
        raw.map(decode).transpose()
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

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO workspaces (id, name, system_id, owner_id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.name,
                record.system_id,
                record.owner_id,
                serde_json::to_string(&record.data)?,
                encode_ts(record.created_at)?,
                encode_ts(record.updated_at)?,
            ],
        )?;
        Ok(record)
    }

    fn rename(&self, id: &str, name: &str) -> StoreResult<bool> {
        let name = validate_workspace_name(name)?;
        let now = encode_ts(self.clock.now())?;

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let data: Option<String> = tx
            .query_row("SELECT data FROM workspaces WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        let Some(data) = data else {
            return Ok(false);
        };

        let data = rename_data(&serde_json::from_str(&data)?, &name);
        tx.execute(
            "UPDATE workspaces SET name = ?1, data = ?2, updated_at = ?3 WHERE id = ?4",
            params![name, serde_json::to_string(&data)?, now, id],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let n = conn.execute("DELETE FROM workspaces WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }
}
