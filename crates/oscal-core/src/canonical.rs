//! Canonical JSON encoding.
//!
//! Two modes exist and they must never be mixed for equality checks:
//! - [`CanonicalMode::Pretty`]: sorted keys, 2-space indent, `": "` key
//!   separator. Used for SSP exports, golden files and line diffs.
//! - [`CanonicalMode::Compact`]: sorted keys, no whitespace (`,` / `:`).
//!   Used for workspace snapshots and content hashing.
//!
//! Both modes escape every character outside printable ASCII as `\uXXXX`
//! (UTF-16 code units, lowercase hex) so the output is pure ASCII and
//! byte-stable across platforms and locales.

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Map, Value};

use crate::errors::{OscalError, OscalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalMode {
    Pretty,
    Compact,
}

/// Return a deep copy of `value` with every object's keys sorted.
pub fn canonicalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k.clone(), canonicalize_json(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize_json).collect()),
        other => other.clone(),
    }
}

/// Encode any serializable value in the requested canonical mode.
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T, mode: CanonicalMode) -> OscalResult<Vec<u8>> {
    let value = serde_json::to_value(value)?;
    let sorted = canonicalize_json(&value);

    let mut out = Vec::new();
    match mode {
        CanonicalMode::Pretty => {
            let fmt = AsciiFormatter(PrettyFormatter::with_indent(b"  "));
            let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
            sorted.serialize(&mut ser)?;
        }
        CanonicalMode::Compact => {
            let fmt = AsciiFormatter(CompactFormatter);
            let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
            sorted.serialize(&mut ser)?;
        }
    }
    Ok(out)
}

/// Pretty canonical form (sorted keys, 2-space indent).
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> OscalResult<String> {
    into_string(canonical_json_bytes(value, CanonicalMode::Pretty)?)
}

/// Compact canonical form (sorted keys, `,`/`:` separators).
pub fn canonical_json_compact<T: Serialize + ?Sized>(value: &T) -> OscalResult<String> {
    into_string(canonical_json_bytes(value, CanonicalMode::Compact)?)
}

fn into_string(bytes: Vec<u8>) -> OscalResult<String> {
    String::from_utf8(bytes)
        .map_err(|e| OscalError::invariant(format!("canonical output is not utf-8: {e}")))
}

/// Wraps a serde_json formatter and escapes non-ASCII characters.
///
/// serde_json hands control characters, quotes and backslashes to
/// `write_char_escape`; everything else arrives here as a fragment.
struct AsciiFormatter<F>(F);

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            if start < idx {
                writer.write_all(fragment[start..idx].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        if start < fragment.len() {
            writer.write_all(fragment[start..].as_bytes())?;
        }
        Ok(())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_sorts_and_indents() {
        let v = json!({"b": [1, 2], "a": {"y": 2, "x": 1}, "c": [], "d": {}});
        let s = canonical_json(&v).unwrap();
        let expected = "{\n  \"a\": {\n    \"x\": 1,\n    \"y\": 2\n  },\n  \"b\": [\n    1,\n    2\n  ],\n  \"c\": [],\n  \"d\": {}\n}";
        assert_eq!(s, expected);
    }

    #[test]
    fn compact_has_no_whitespace() {
        let v = json!({"workspace": {"system_name": "X", "created_at": "t"}});
        let s = canonical_json_compact(&v).unwrap();
        assert_eq!(s, r#"{"workspace":{"created_at":"t","system_name":"X"}}"#);
    }

    #[test]
    fn non_ascii_is_escaped() {
        let v = json!({"name": "café \u{1F600}"});
        let s = canonical_json_compact(&v).unwrap();
        assert_eq!(s, r#"{"name":"caf\u00e9 \ud83d\ude00"}"#);
    }

    #[test]
    fn control_characters_keep_standard_escapes() {
        let v = json!("line\nbreak \"quoted\"");
        let s = canonical_json_compact(&v).unwrap();
        assert_eq!(s, r#""line\nbreak \"quoted\"""#);
    }

    #[test]
    fn encoding_is_idempotent() {
        let v = json!({"z": [3, 2, 1], "a": {"k": "v"}});
        assert_eq!(canonical_json(&v).unwrap(), canonical_json(&v).unwrap());
        assert_eq!(
            canonical_json_bytes(&v, CanonicalMode::Compact).unwrap(),
            canonical_json_bytes(&v, CanonicalMode::Compact).unwrap()
        );
    }

    #[test]
    fn canonicalize_preserves_array_order() {
        let v = json!([{"b": 1, "a": 2}, 3]);
        let c = canonicalize_json(&v);
        assert_eq!(c, json!([{"a": 2, "b": 1}, 3]));
    }
}
