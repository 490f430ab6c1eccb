use serde::Serialize;
use similar::TextDiff;

use crate::canonical::canonical_json;
use crate::errors::OscalResult;

pub const BEFORE_LABEL: &str = "before.json";
pub const AFTER_LABEL: &str = "after.json";

/// Lines of unchanged context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Unified diff between the pretty canonical encodings of two payloads.
///
/// Identical payloads produce an empty string.
pub fn unified_json_diff<B, A>(before: &B, after: &A) -> OscalResult<String>
where
    B: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    // Terminate the last line so it diffs like every other line.
    let before_text = canonical_json(before)? + "\n";
    let after_text = canonical_json(after)? + "\n";
    if before_text == after_text {
        return Ok(String::new());
    }

    let diff = TextDiff::from_lines(&before_text, &after_text);
    Ok(diff
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(BEFORE_LABEL, AFTER_LABEL)
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn changed_value_shows_both_lines() {
        let diff = unified_json_diff(&json!({"a": 1}), &json!({"a": 2})).unwrap();
        assert!(diff.starts_with("--- before.json\n+++ after.json\n@@"));
        assert!(diff.contains("\n-  \"a\": 1\n"));
        assert!(diff.contains("\n+  \"a\": 2\n"));
    }

    #[test]
    fn nested_narrative_change() {
        let before = json!({"control": {"narrative": "old"}});
        let after = json!({"control": {"narrative": "new"}});
        let diff = unified_json_diff(&before, &after).unwrap();
        assert!(diff.contains("-    \"narrative\": \"old\""));
        assert!(diff.contains("+    \"narrative\": \"new\""));
    }

    #[test]
    fn key_order_does_not_matter() {
        let a = json!({"x": 1, "y": [1, 2]});
        let b = json!({"y": [1, 2], "x": 1});
        assert_eq!(unified_json_diff(&a, &b).unwrap(), "");
    }

    #[test]
    fn diff_is_deterministic() {
        let a = json!({"k": "v1", "list": [1, 2, 3]});
        let b = json!({"k": "v2", "list": [1, 3]});
        assert_eq!(unified_json_diff(&a, &b).unwrap(), unified_json_diff(&a, &b).unwrap());
    }
}
