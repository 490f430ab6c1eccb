//! oscal-core
//!
//! Core primitives for the OSCAL System Security Plan wizard:
//! - Workspace schema (system foundation, roles, parties, components)
//! - Structural and referential validation with accumulated findings
//! - Canonical JSON encoding for exports and content hashing
//! - SSP export projection and workspace snapshot import/export
//! - Deterministic identifiers for idempotent upserts
//! - JSON and narrative diffing
//! - Catalog and component-definition loading

pub mod canonical;
pub mod catalog;
pub mod components;
pub mod config;
pub mod diff;
pub mod errors;
pub mod export;
pub mod hash;
pub mod ids;
pub mod interview;
pub mod model;
pub mod parse;
pub mod validate;

pub use crate::errors::{OscalError, OscalResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::canonical::{canonical_json, canonical_json_bytes, canonical_json_compact, CanonicalMode};
    pub use crate::catalog::{
        load_catalog_controls, load_control_subset, select_controls_by_prefix, CatalogPaths, ControlSummary,
    };
    pub use crate::components::{extract_component_drafts, import_component_drafts, load_component_definitions};
    pub use crate::diff::{collect_narrative_changes, narrative_html_diff, unified_json_diff, NarrativeChange};
    pub use crate::export::{export_ssp_json, export_workspace, import_workspace};
    pub use crate::ids::{deterministic_id, deterministic_uuid};
    pub use crate::interview::{review_interview, ControlResponse, InterviewReview};
    pub use crate::model::{
        Component, ComponentDraft, ImpactLevel, Party, PartyType, ResponsibleParty, Role,
        SystemFoundation, Workspace, WorkspaceMetadata, WorkspaceSnapshot,
    };
    pub use crate::parse::{detect_kind, parse_json_bytes, DocumentKind};
    pub use crate::validate::{validate_ssp_file, validate_ssp_json, validate_workspace, Finding, Severity};
    pub use crate::{OscalError, OscalResult};
}
