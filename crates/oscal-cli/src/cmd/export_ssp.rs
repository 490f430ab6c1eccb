use std::io::Write;
use std::path::Path;

use anyhow::Result;
use oscal_core::export::export_ssp_json;
use oscal_core::hash::hash_bytes_hex;
use oscal_core::parse::parse_workspace_bytes;
use serde::Serialize;

use super::Context;
use crate::io::{export, input};
use crate::output;

#[derive(Debug, Serialize)]
pub struct ExportOut {
    pub path: String,
    pub sha256: String,
}

pub fn run(ctx: &Context, workspace_path: &Path, out: Option<&Path>) -> Result<()> {
    let raw = input::read_bytes(workspace_path)?;
    let workspace = parse_workspace_bytes(&raw, ctx.max_json_bytes())?;
    let ssp = export_ssp_json(&workspace)?;

    let Some(out) = out else {
        return export::write_output(None, ssp.as_bytes());
    };
    export::write_output(Some(out), ssp.as_bytes())?;
    tracing::info!(
        target: "audit",
        event = "ssp_exported",
        system_uuid = %workspace.system.system_uuid,
        path = %out.display(),
    );

    let summary = ExportOut {
        path: out.display().to_string(),
        sha256: hash_bytes_hex(ssp.as_bytes()),
    };
    output::emit(&summary, |w| writeln!(w, "wrote {} ({})", summary.path, summary.sha256))
}
