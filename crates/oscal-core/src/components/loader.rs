use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{OscalError, OscalResult};
use crate::hash::hash_bytes_hex;
use crate::model::{ComponentDraft, Upsert, Workspace};

const DEFINITION_KEY: &str = "component-definition";

/// A parsed component-definition file.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefinitionFile {
    pub path: PathBuf,
    /// SHA-256 of the raw file bytes, lowercase hex.
    pub sha256: String,
    pub payload: Map<String, Value>,
}

impl ComponentDefinitionFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Load every `*.json` file directly inside `dir`, in sorted path order.
pub fn load_component_definitions(dir: &Path) -> OscalResult<Vec<ComponentDefinitionFile>> {
    if !dir.exists() {
        return Err(OscalError::not_found(format!(
            "Component directory not found: {}",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(OscalError::invalid_argument(format!(
            "Component path is not a directory: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| OscalError::Io(e.into()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        out.push(load_definition(path)?);
    }
    debug!(dir = %dir.display(), files = out.len(), "component definitions loaded");
    Ok(out)
}

fn load_definition(path: PathBuf) -> OscalResult<ComponentDefinitionFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let raw = fs::read(&path)?;
    let payload: Value = serde_json::from_slice(&raw)
        .map_err(|e| OscalError::serialization(format!("invalid JSON in {name}: {e}")))?;

    let Value::Object(payload) = payload else {
        return Err(OscalError::invalid_argument(format!(
            "Component definition must be an object: {name}"
        )));
    };
    if !payload.contains_key(DEFINITION_KEY) {
        return Err(OscalError::invalid_argument(format!(
            "Missing component-definition in {name}"
        )));
    }

    Ok(ComponentDefinitionFile {
        sha256: hash_bytes_hex(&raw),
        path,
        payload,
    })
}

/// Drafts for every complete component in a definition file.
///
/// Entries that are not objects, or whose `type`, `title` or `description`
/// is missing or blank, are skipped.
pub fn extract_component_drafts(definition: &ComponentDefinitionFile) -> Vec<ComponentDraft> {
    let Some(components) = definition
        .payload
        .get(DEFINITION_KEY)
        .and_then(|d| d.get("components"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    components
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|c| {
            let text = |key: &str| {
                c.get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
            };
            Some(ComponentDraft::new(text("type")?, text("title")?, text("description")?))
        })
        .collect()
}

/// Append drafts as components, skipping ones already in the workspace.
///
/// Returns the number of components inserted.
pub fn import_component_drafts(
    workspace: &mut Workspace,
    drafts: impl IntoIterator<Item = ComponentDraft>,
) -> OscalResult<usize> {
    let mut inserted = 0;
    for draft in drafts {
        if workspace.add_component(draft)? == Upsert::Inserted {
            inserted += 1;
        }
    }
    Ok(inserted)
}
