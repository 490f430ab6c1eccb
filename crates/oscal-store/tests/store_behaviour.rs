//! Behaviour shared by every `WorkspaceStore` implementation.

use std::sync::Arc;

use assert_matches::assert_matches;
use oscal_core::model::WorkspaceSnapshot;
use oscal_store::{FixedClock, MemoryWorkspaceStore, NewWorkspace, StoreError, WorkspaceStore};
use serde_json::json;
use time::{Duration, OffsetDateTime};

fn start() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)
}

fn new_workspace(name: &str) -> NewWorkspace {
    let snap = WorkspaceSnapshot::new(name, start()).unwrap();
    NewWorkspace::from_snapshot(&snap).unwrap()
}

fn stores(clock: &Arc<FixedClock>) -> Vec<(&'static str, Box<dyn WorkspaceStore>)> {
    let mut out: Vec<(&'static str, Box<dyn WorkspaceStore>)> = Vec::new();
    out.push(("memory", Box::new(MemoryWorkspaceStore::with_clock(clock.clone()))));
    #[cfg(feature = "sqlite")]
    out.push((
        "sqlite",
        Box::new(oscal_store::SqliteWorkspaceStore::in_memory_with_clock(clock.clone()).unwrap()),
    ));
    out
}

#[test]
fn create_and_get() {
    let clock = Arc::new(FixedClock::new(start()));
    for (label, store) in stores(&clock) {
        let rec = store.create(new_workspace("  Demo  ")).unwrap();
        assert_eq!(rec.name, "Demo", "{label}");
        assert_eq!(rec.id.len(), 36, "{label}");
        assert_eq!(rec.created_at, start(), "{label}");

        let fetched = store.get(&rec.id).unwrap().unwrap();
        assert_eq!(fetched, rec, "{label}");
        assert!(store.get("missing").unwrap().is_none(), "{label}");
    }
}

#[test]
fn created_at_defaults_to_clock() {
    let clock = Arc::new(FixedClock::new(start() + Duration::hours(3)));
    for (label, store) in stores(&clock) {
        let mut new = new_workspace("Demo");
        new.created_at = None;
        let rec = store.create(new).unwrap();
        assert_eq!(rec.created_at, start() + Duration::hours(3), "{label}");
        assert_eq!(rec.updated_at, rec.created_at, "{label}");
    }
}

#[test]
fn list_is_newest_update_first() {
    let clock = Arc::new(FixedClock::new(start()));
    for (label, store) in stores(&clock) {
        clock.set(start());
        let first = store.create(new_workspace("First")).unwrap();
        clock.advance(Duration::minutes(1));
        store.create(new_workspace("Second")).unwrap();
        clock.advance(Duration::minutes(1));
        assert!(store.rename(&first.id, "First renamed").unwrap());

        let names: Vec<_> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["First renamed", "Second"], "{label}");
    }
}

#[test]
fn rename_rewrites_system_name() {
    let clock = Arc::new(FixedClock::new(start()));
    for (label, store) in stores(&clock) {
        let rec = store.create(new_workspace("Old")).unwrap();
        clock.advance(Duration::seconds(30));
        assert!(store.rename(&rec.id, " New ").unwrap(), "{label}");

        let renamed = store.get(&rec.id).unwrap().unwrap();
        assert_eq!(renamed.name, "New", "{label}");
        assert_eq!(renamed.data["system_name"], "New", "{label}");
        assert_eq!(renamed.data["system_id"], rec.data["system_id"], "{label}");
        assert_eq!(renamed.updated_at, rec.updated_at + Duration::seconds(30), "{label}");

        assert!(!store.rename("missing", "Name").unwrap(), "{label}");
        assert_matches!(store.rename(&rec.id, "   "), Err(StoreError::InvalidName(_)));
    }
}

#[test]
fn rename_leaves_non_object_data_alone() {
    let clock = Arc::new(FixedClock::new(start()));
    for (label, store) in stores(&clock) {
        let mut new = new_workspace("Odd");
        new.data = json!(["not", "an", "object"]);
        let rec = store.create(new).unwrap();
        assert!(store.rename(&rec.id, "Renamed").unwrap());
        assert_eq!(store.get(&rec.id).unwrap().unwrap().data, json!(["not", "an", "object"]), "{label}");
    }
}

#[test]
fn delete_reports_presence() {
    let clock = Arc::new(FixedClock::new(start()));
    for (label, store) in stores(&clock) {
        let rec = store.create(new_workspace("Gone")).unwrap();
        assert!(store.delete(&rec.id).unwrap(), "{label}");
        assert!(!store.delete(&rec.id).unwrap(), "{label}");
        assert!(store.list().unwrap().is_empty(), "{label}");
    }
}

#[test]
fn invalid_names_are_rejected_on_create() {
    let clock = Arc::new(FixedClock::new(start()));
    for (_, store) in stores(&clock) {
        let mut new = new_workspace("Ok");
        new.name = "x".repeat(201);
        assert_matches!(store.create(new), Err(StoreError::InvalidName(_)));
        assert!(store.list().unwrap().is_empty());
    }
}
