//! Data models.
//!
//! - [`workspace`]: the internal aggregate edited by the wizard (snake_case wire names).
//! - [`snapshot`]: the minimal portable workspace form used for import/export.
//! - [`ssp`]: the external OSCAL SSP document shape (hyphenated wire names).
//!
//! Models are plain values. Semantic checks live in `crate::validate`;
//! the mapping between internal and external shapes lives in `crate::export`.

pub mod snapshot;
pub mod ssp;
pub mod workspace;

pub use snapshot::WorkspaceSnapshot;
pub use ssp::{
    AuthorizationBoundary, SspComponent, SspDocument, SspMetadata, SspParty, SspResponsibleParty,
    SspRole, SystemCharacteristics, SystemImplementation, SystemSecurityPlan,
};
pub use workspace::{
    split_email_addresses, Component, ComponentDraft, ImpactLevel, Party, PartyType,
    ResponsibleParty, Role, SystemFoundation, Upsert, Workspace, WorkspaceMetadata,
};
