use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::narrative::narrative_html_diff;

/// Suffix (case-insensitive) that marks a string leaf as narrative text.
const NARRATIVE_SUFFIX: &str = "narrative";

/// One changed narrative: where it lives and its HTML diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeChange {
    pub path: String,
    pub diff: String,
}

/// Diff every narrative leaf that differs between two documents.
///
/// Paths present on one side only diff against the empty string. Results
/// are ordered by path.
pub fn collect_narrative_changes(before: &Value, after: &Value) -> Vec<NarrativeChange> {
    let before_map = flatten_narratives(before);
    let after_map = flatten_narratives(after);

    let mut paths: Vec<&String> = before_map.keys().chain(after_map.keys()).collect();
    paths.sort();
    paths.dedup();

    paths
        .into_iter()
        .filter_map(|path| {
            let before_text = before_map.get(path).map(String::as_str).unwrap_or("");
            let after_text = after_map.get(path).map(String::as_str).unwrap_or("");
            if before_text == after_text {
                return None;
            }
            Some(NarrativeChange {
                path: path.clone(),
                diff: narrative_html_diff(before_text, after_text),
            })
        })
        .collect()
}

/// Map of `$.a.b[2].narrative`-style paths to narrative text.
pub fn flatten_narratives(payload: &Value) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    walk("$".to_string(), payload, &mut out);
    out
}

fn walk(path: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                walk(format!("{path}.{key}"), nested, out);
            }
        }
        Value::Array(items) => {
            for (idx, nested) in items.iter().enumerate() {
                walk(format!("{path}[{idx}]"), nested, out);
            }
        }
        Value::String(text) if path.to_lowercase().ends_with(NARRATIVE_SUFFIX) => {
            out.insert(path, text.clone());
        }
        _ => {}
    }
}
