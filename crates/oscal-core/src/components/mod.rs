//! OSCAL component-definition import.
//!
//! Component-definition files are read from a directory, hashed, and turned
//! into [`crate::model::ComponentDraft`]s that the workspace promotes into
//! components with deterministic UUIDs.

mod loader;

pub use loader::{
    extract_component_drafts, import_component_drafts, load_component_definitions,
    ComponentDefinitionFile,
};
