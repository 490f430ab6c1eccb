use similar::{DiffTag, TextDiff};

/// Character-level diff of two narratives rendered as HTML fragments.
///
/// Unchanged text passes through escaped, insertions are wrapped in `<ins>`,
/// deletions in `<del>`, and a replacement becomes `<del>` followed by `<ins>`.
pub fn narrative_html_diff(before: &str, after: &str) -> String {
    let diff = TextDiff::from_chars(before, after);
    let old = diff.old_slices();
    let new = diff.new_slices();

    let mut out = String::with_capacity(before.len() + after.len());
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let removed = old[old_range].concat();
        let added = new[new_range].concat();
        match tag {
            DiffTag::Equal => out.push_str(&escape_html(&added)),
            DiffTag::Insert => wrap(&mut out, "ins", &added),
            DiffTag::Delete => wrap(&mut out, "del", &removed),
            DiffTag::Replace => {
                wrap(&mut out, "del", &removed);
                wrap(&mut out, "ins", &added);
            }
        }
    }
    out
}

fn wrap(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_html(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escape `&`, `<`, `>` and `"` for safe embedding in HTML.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_insertions_and_deletions() {
        let diff = narrative_html_diff("old text", "new text");
        assert!(diff.contains("<del>old"));
        assert!(diff.contains("<ins>new"));
        assert!(diff.ends_with(" text"));
    }

    #[test]
    fn identical_text_passes_through() {
        assert_eq!(narrative_html_diff("same", "same"), "same");
        assert_eq!(narrative_html_diff("", ""), "");
    }

    #[test]
    fn pure_insert_and_delete() {
        assert_eq!(narrative_html_diff("", "abc"), "<ins>abc</ins>");
        assert_eq!(narrative_html_diff("abc", ""), "<del>abc</del>");
        assert_eq!(narrative_html_diff("ac", "abc"), "a<ins>b</ins>c");
    }

    #[test]
    fn markup_in_inputs_is_escaped() {
        let diff = narrative_html_diff("a & b", "<script>\"x\"</script>");
        assert!(diff.contains("&lt;script&gt;"));
        assert!(diff.contains("&quot;"));
        assert!(!diff.contains("<script>"));

        let same = narrative_html_diff("<b>", "<b>");
        assert_eq!(same, "&lt;b&gt;");
    }

    #[test]
    fn escape_covers_all_specials() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
