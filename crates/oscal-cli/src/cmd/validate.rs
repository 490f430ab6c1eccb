use std::path::Path;

use anyhow::Result;
use oscal_core::parse::{detect_kind, DocumentKind};
use oscal_core::model::Workspace;
use oscal_core::validate::{validate_ssp_json, validate_workspace_with, Finding};
use serde::Serialize;

use super::{findings_result, Context};
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct ValidateOut {
    pub ok: bool,
    pub kind: DocumentKind,
    pub findings: Vec<Finding>,
}

/// Validate a workspace or an SSP, whichever the file holds.
pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let payload = input::read_json_object(path, ctx.max_json_bytes())?;
    let payload = serde_json::Value::Object(payload);

    let (kind, findings) = match detect_kind(&payload) {
        DocumentKind::Ssp => (DocumentKind::Ssp, validate_ssp_json(&payload)),
        _ => {
            let workspace = Workspace::from_value(payload)?;
            (DocumentKind::Workspace, validate_workspace_with(&workspace, &ctx.core))
        }
    };
    report(kind, findings)
}

/// Check a file strictly against the SSP document shape.
pub fn run_ssp(ctx: &Context, path: &Path) -> Result<()> {
    let payload = input::read_json_file(path, ctx.max_json_bytes())?;
    report(DocumentKind::Ssp, validate_ssp_json(&payload))
}

fn report(kind: DocumentKind, findings: Vec<Finding>) -> Result<()> {
    let count = findings.len();
    let out = ValidateOut {
        ok: findings.is_empty(),
        kind,
        findings,
    };
    output::emit(&out, |w| output::write_findings(w, &out.findings))?;
    findings_result(count)
}
