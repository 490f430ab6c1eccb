use std::io::Write;

use anyhow::Result;
use oscal_core::catalog::{load_control_subset, ControlSummary};
use serde::Serialize;

use super::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CatalogOut {
    pub data_dir: String,
    pub controls: Vec<ControlSummary>,
}

pub fn run(ctx: &Context, prefix: &str, limit: usize) -> Result<()> {
    let controls = load_control_subset(&ctx.catalog, prefix, limit)?;
    let out = CatalogOut {
        data_dir: ctx.catalog.data_dir.display().to_string(),
        controls,
    };
    output::emit(&out, |w| {
        if out.controls.is_empty() {
            return writeln!(w, "no controls found in {}", out.data_dir);
        }
        for c in &out.controls {
            writeln!(w, "{:<12} {}", c.control_id, c.title)?;
        }
        Ok(())
    })
}
