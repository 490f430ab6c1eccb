use std::io::Write;
use std::path::Path;

use anyhow::Result;
use oscal_core::components::{extract_component_drafts, import_component_drafts, load_component_definitions};
use oscal_core::export::workspace_to_canonical_json;
use oscal_core::model::ComponentDraft;
use oscal_core::parse::parse_workspace_bytes;
use serde::Serialize;

use super::Context;
use crate::io::{export, input};
use crate::output;

#[derive(Debug, Serialize)]
pub struct DefinitionOut {
    pub file: String,
    pub sha256: String,
    pub components: Vec<ComponentDraft>,
}

#[derive(Debug, Serialize)]
pub struct ComponentsOut {
    pub definitions: Vec<DefinitionOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<usize>,
}

pub fn run(ctx: &Context, dir: &Path, workspace_path: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let definitions: Vec<DefinitionOut> = load_component_definitions(dir)?
        .iter()
        .map(|d| DefinitionOut {
            file: d.file_name(),
            sha256: d.sha256.clone(),
            components: extract_component_drafts(d),
        })
        .collect();

    let Some(workspace_path) = workspace_path else {
        let summary = ComponentsOut { definitions, inserted: None };
        return output::emit(&summary, |w| write_definitions(w, &summary.definitions));
    };

    let raw = input::read_bytes(workspace_path)?;
    let mut workspace = parse_workspace_bytes(&raw, ctx.max_json_bytes())?;
    let drafts = definitions.iter().flat_map(|d| d.components.iter().cloned());
    let inserted = import_component_drafts(&mut workspace, drafts)?;
    tracing::info!(
        target: "audit",
        event = "components_imported",
        dir = %dir.display(),
        inserted,
    );

    let updated = workspace_to_canonical_json(&workspace)?;
    match out {
        Some(path) => {
            export::write_output(Some(path), updated.as_bytes())?;
            let summary = ComponentsOut { definitions, inserted: Some(inserted) };
            output::emit(&summary, |w| {
                write_definitions(w, &summary.definitions)?;
                writeln!(w, "inserted {inserted} component(s) into {}", path.display())
            })
        }
        None => export::write_output(None, updated.as_bytes()),
    }
}

fn write_definitions(w: &mut termcolor::StandardStream, definitions: &[DefinitionOut]) -> std::io::Result<()> {
    for d in definitions {
        writeln!(w, "{} ({})", d.file, d.sha256)?;
        for c in &d.components {
            writeln!(w, "  [{}] {}: {}", c.component_type, c.title, c.description)?;
        }
    }
    Ok(())
}
