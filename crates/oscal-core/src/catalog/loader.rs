use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{OscalError, OscalResult};

/// One control flattened out of a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSummary {
    pub control_id: String,
    pub title: String,
}

/// Read a catalog file and flatten its controls.
pub fn load_catalog_controls(path: &Path) -> OscalResult<Vec<ControlSummary>> {
    let raw = fs::read(path)?;
    let payload: Value = serde_json::from_slice(&raw).map_err(|e| {
        OscalError::serialization(format!("invalid catalog JSON in {}: {e}", path.display()))
    })?;
    let controls = controls_from_catalog(&payload)?;
    debug!(path = %path.display(), controls = controls.len(), "catalog loaded");
    Ok(controls)
}

/// Flatten every control under `catalog`, sorted by control id.
///
/// Controls nest inside `groups` and inside other controls. Non-object
/// entries are skipped; a control without an `id` aborts the whole load.
pub fn controls_from_catalog(payload: &Value) -> OscalResult<Vec<ControlSummary>> {
    let catalog = payload
        .get("catalog")
        .and_then(Value::as_object)
        .ok_or_else(|| OscalError::invalid_argument("Catalog JSON must include a 'catalog' object."))?;

    let mut out = Vec::new();
    collect(catalog, &mut out)?;
    out.sort_by(|a, b| a.control_id.cmp(&b.control_id));
    Ok(out)
}

fn collect(node: &Map<String, Value>, out: &mut Vec<ControlSummary>) -> OscalResult<()> {
    if let Some(Value::Array(controls)) = node.get("controls") {
        for control in controls.iter().filter_map(Value::as_object) {
            let control_id = match control.get("id").and_then(Value::as_str) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => return Err(OscalError::invalid_argument("Control entry missing id.")),
            };
            let title = control
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            out.push(ControlSummary { control_id, title });
            collect(control, out)?;
        }
    }

    if let Some(Value::Array(groups)) = node.get("groups") {
        for group in groups.iter().filter_map(Value::as_object) {
            collect(group, out)?;
        }
    }
    Ok(())
}

/// Case-insensitive prefix filter keeping at most `limit` controls, in order.
pub fn select_controls_by_prefix(controls: &[ControlSummary], prefix: &str, limit: usize) -> Vec<ControlSummary> {
    let prefix = prefix.to_lowercase();
    controls
        .iter()
        .filter(|c| c.control_id.to_lowercase().starts_with(&prefix))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn ids(controls: &[ControlSummary]) -> Vec<&str> {
        controls.iter().map(|c| c.control_id.as_str()).collect()
    }

    #[test]
    fn flattens_groups_and_sub_controls() {
        let catalog = json!({
            "catalog": {
                "id": "cat",
                "groups": [{
                    "id": "ac",
                    "controls": [
                        {"id": "ac-2", "title": "Account Management",
                         "controls": [{"id": "ac-2.1", "title": "Automated"}]},
                        {"id": "ac-1", "title": "Policy"}
                    ]
                }]
            }
        });
        let controls = controls_from_catalog(&catalog).unwrap();
        assert_eq!(ids(&controls), vec!["ac-1", "ac-2", "ac-2.1"]);
        assert_eq!(controls[2].title, "Automated");
    }

    #[test]
    fn top_level_controls_and_nested_groups() {
        let catalog = json!({
            "catalog": {
                "controls": [{"id": "zz-1"}],
                "groups": [{"groups": [{"controls": [{"id": "au-1", "title": "Audit"}]}]}, "junk"]
            }
        });
        let controls = controls_from_catalog(&catalog).unwrap();
        assert_eq!(ids(&controls), vec!["au-1", "zz-1"]);
        assert_eq!(controls[1].title, "");
    }

    #[test]
    fn missing_id_is_fatal() {
        let catalog = json!({"catalog": {"controls": [{"id": "ac-1"}, {"title": "no id"}]}});
        let err = controls_from_catalog(&catalog).unwrap_err();
        assert_eq!(err.to_string(), "Control entry missing id.");

        let empty = json!({"catalog": {"controls": [{"id": ""}]}});
        assert_matches!(controls_from_catalog(&empty), Err(OscalError::InvalidArgument(_)));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let catalog = json!({"catalog": {"controls": ["ac-1", 3, {"id": "ac-2"}]}});
        assert_eq!(ids(&controls_from_catalog(&catalog).unwrap()), vec!["ac-2"]);
    }

    #[test]
    fn catalog_object_is_required() {
        assert_matches!(controls_from_catalog(&json!({})), Err(OscalError::InvalidArgument(_)));
        assert_matches!(
            controls_from_catalog(&json!({"catalog": []})),
            Err(OscalError::InvalidArgument(_))
        );
    }

    #[test]
    fn prefix_selection() {
        let controls: Vec<_> = ["AC-1", "ac-2", "au-1", "ac-3"]
            .iter()
            .map(|id| ControlSummary { control_id: id.to_string(), title: String::new() })
            .collect();
        assert_eq!(ids(&select_controls_by_prefix(&controls, "Ac", 10)), vec!["AC-1", "ac-2", "ac-3"]);
        assert_eq!(ids(&select_controls_by_prefix(&controls, "ac", 2)), vec!["AC-1", "ac-2"]);
        assert!(select_controls_by_prefix(&controls, "ac", 0).is_empty());
        assert_eq!(select_controls_by_prefix(&controls, "", 10).len(), 4);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{"catalog": {"controls": [{"id": "b"}, {"id": "a"}]}}"#).unwrap();
        assert_eq!(ids(&load_catalog_controls(&path).unwrap()), vec!["a", "b"]);

        let missing = dir.path().join("nope.json");
        assert_matches!(load_catalog_controls(&missing), Err(OscalError::Io(_)));
    }
}
