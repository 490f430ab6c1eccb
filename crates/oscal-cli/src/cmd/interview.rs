use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};
use oscal_core::catalog::load_control_subset;
use oscal_core::interview::{review_interview, ControlResponse, InterviewReview};

use super::{findings_result, Context};
use crate::io::input;
use crate::output;

pub fn run(ctx: &Context, responses_path: &Path, prefix: &str, limit: usize) -> Result<()> {
    let raw = input::read_json_file(responses_path, ctx.max_json_bytes())?;
    let responses: BTreeMap<String, ControlResponse> = serde_json::from_value(raw)
        .with_context(|| format!("invalid responses in {}", responses_path.display()))?;

    let controls = load_control_subset(&ctx.catalog, prefix, limit)?;
    let review: InterviewReview = review_interview(&controls, &responses);

    output::emit(&review, |w| {
        output::write_findings(w, &review.findings)?;
        for p in &review.preview {
            writeln!(w, "\n{} {}\n  {}", p.control_id, p.title, p.narrative)?;
        }
        Ok(())
    })?;
    findings_result(review.findings.len())
}
