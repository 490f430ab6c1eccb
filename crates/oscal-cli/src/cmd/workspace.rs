use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use oscal_core::export::{export_workspace, import_workspace};
use oscal_core::model::snapshot::format_timestamp;
use oscal_core::model::WorkspaceSnapshot;
use oscal_store::{NewWorkspace, SqliteWorkspaceStore, SystemClock, WorkspaceRecord, WorkspaceStore};
use serde::Serialize;
use time::OffsetDateTime;

use super::Context;
use crate::args::WorkspaceCommand;
use crate::io::{export, input};
use crate::output;

#[derive(Debug, Serialize)]
pub struct RecordOut {
    pub id: String,
    pub name: String,
    pub system_id: String,
    pub owner_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl RecordOut {
    fn from_record(r: &WorkspaceRecord) -> Result<Self> {
        Ok(Self {
            id: r.id.clone(),
            name: r.name.clone(),
            system_id: r.system_id.clone(),
            owner_id: r.owner_id.clone(),
            created_at: format_timestamp(r.created_at)?,
            updated_at: format_timestamp(r.updated_at)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ChangedOut {
    pub id: String,
    pub changed: bool,
}

fn open_store(ctx: &Context) -> Result<SqliteWorkspaceStore> {
    Ok(SqliteWorkspaceStore::open_in_dir(&ctx.store_root, Arc::new(SystemClock))?)
}

pub fn run(ctx: &Context, action: WorkspaceCommand) -> Result<()> {
    let store = open_store(ctx)?;
    match action {
        WorkspaceCommand::Create { name, owner } => create(&store, &name, owner),
        WorkspaceCommand::Import { file } => import(ctx, &store, &file),
        WorkspaceCommand::Export { id, out } => export_record(&store, &id, out.as_deref()),
        WorkspaceCommand::List => list(&store),
        WorkspaceCommand::Rename { id, name } => rename(&store, &id, &name),
        WorkspaceCommand::Delete { id } => delete(&store, &id),
    }
}

fn print_record(record: &WorkspaceRecord) -> Result<()> {
    let out = RecordOut::from_record(record)?;
    output::emit(&out, |w| writeln!(w, "{}  {}  ({})", out.id, out.name, out.system_id))
}

fn create(store: &dyn WorkspaceStore, name: &str, owner: Option<String>) -> Result<()> {
    let snapshot = WorkspaceSnapshot::new(name, OffsetDateTime::now_utc())?;
    let mut new = NewWorkspace::from_snapshot(&snapshot)?;
    new.owner_id = owner;
    let record = store.create(new)?;
    tracing::info!(target: "audit", event = "workspace_created", workspace_id = %record.id);
    print_record(&record)
}

fn import(ctx: &Context, store: &dyn WorkspaceStore, file: &Path) -> Result<()> {
    let raw = input::read_bytes(file)?;
    if raw.len() > ctx.max_json_bytes() {
        return Err(anyhow!("Workspace file is too large."));
    }
    let snapshot = import_workspace(&raw)?;
    let record = store.create(NewWorkspace::from_snapshot(&snapshot)?)?;
    tracing::info!(
        target: "audit",
        event = "workspace_imported",
        workspace_id = %record.id,
        filename = %input::file_label(file),
    );
    print_record(&record)
}

fn export_record(store: &dyn WorkspaceStore, id: &str, out: Option<&Path>) -> Result<()> {
    let record = store
        .get(id)?
        .ok_or_else(|| anyhow!("Workspace not found: {id}"))?;
    let bytes = export_workspace(&record.snapshot()?)?;
    export::write_output(out, &bytes)?;
    tracing::info!(target: "audit", event = "workspace_exported", workspace_id = %record.id);
    Ok(())
}

fn list(store: &dyn WorkspaceStore) -> Result<()> {
    let records = store
        .list()?
        .iter()
        .map(RecordOut::from_record)
        .collect::<Result<Vec<_>>>()?;
    output::emit(&records, |w| {
        if records.is_empty() {
            return writeln!(w, "no workspaces");
        }
        for r in &records {
            writeln!(w, "{}  {:<40} updated {}", r.id, r.name, r.updated_at)?;
        }
        Ok(())
    })
}

fn rename(store: &dyn WorkspaceStore, id: &str, name: &str) -> Result<()> {
    if !store.rename(id, name)? {
        return Err(anyhow!("Workspace not found: {id}"));
    }
    tracing::info!(target: "audit", event = "workspace_renamed", workspace_id = %id);
    let out = ChangedOut { id: id.to_string(), changed: true };
    output::emit(&out, |w| writeln!(w, "renamed {id}"))
}

fn delete(store: &dyn WorkspaceStore, id: &str) -> Result<()> {
    if !store.delete(id)? {
        return Err(anyhow!("Workspace not found: {id}"));
    }
    tracing::info!(target: "audit", event = "workspace_deleted", workspace_id = %id);
    let out = ChangedOut { id: id.to_string(), changed: true };
    output::emit(&out, |w| writeln!(w, "deleted {id}"))
}
