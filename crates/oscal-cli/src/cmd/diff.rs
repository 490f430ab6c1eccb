use std::io::Write;
use std::path::Path;

use anyhow::Result;
use oscal_core::diff::{collect_narrative_changes, unified_json_diff, NarrativeChange};
use serde::Serialize;
use serde_json::Value;

use super::Context;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct DiffOut {
    pub identical: bool,
    pub diff: String,
    pub narrative_changes: Vec<NarrativeChange>,
}

pub fn run(ctx: &Context, before_path: &Path, after_path: &Path) -> Result<()> {
    let before = Value::Object(input::read_json_object(before_path, ctx.max_json_bytes())?);
    let after = Value::Object(input::read_json_object(after_path, ctx.max_json_bytes())?);

    let diff = unified_json_diff(&before, &after)?;
    let narrative_changes = collect_narrative_changes(&before, &after);
    tracing::info!(
        target: "audit",
        event = "diff_generated",
        before_filename = %input::file_label(before_path),
        after_filename = %input::file_label(after_path),
    );

    let out = DiffOut {
        identical: diff.is_empty(),
        diff,
        narrative_changes,
    };
    output::emit(&out, |w| {
        if out.identical {
            return writeln!(w, "no differences");
        }
        write!(w, "{}", out.diff)?;
        for change in &out.narrative_changes {
            writeln!(w, "\nnarrative {}:\n{}", change.path, change.diff)?;
        }
        Ok(())
    })
}
