//! Minimal portable workspace form.
//!
//! This is what the workspace list persists and what import/export files
//! carry: a name, the id derived from it and a creation timestamp.

use serde_json::{json, Map, Value};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::errors::{OscalError, OscalResult};
use crate::ids::deterministic_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub system_name: String,
    pub system_id: String,
    pub created_at: OffsetDateTime,
}

impl WorkspaceSnapshot {
    /// New snapshot named `name`; `system_id` is derived from the trimmed name.
    pub fn new(name: &str, created_at: OffsetDateTime) -> OscalResult<Self> {
        let system_name = name.trim();
        if system_name.is_empty() {
            return Err(OscalError::invalid_argument("Workspace name is required."));
        }
        Ok(Self {
            system_name: system_name.to_string(),
            system_id: deterministic_id(system_name),
            created_at,
        })
    }

    /// Snapshot with the default creation time (Unix epoch, UTC).
    pub fn with_default_created_at(name: &str) -> OscalResult<Self> {
        Self::new(name, OffsetDateTime::UNIX_EPOCH)
    }

    /// Build from a decoded `{system_name, system_id, created_at}` object.
    pub fn from_payload(payload: &Map<String, Value>) -> OscalResult<Self> {
        let system_name = required_str(payload, "system_name")?.trim();
        if system_name.is_empty() {
            return Err(OscalError::invalid_argument("system_name must not be blank"));
        }
        let system_id = required_str(payload, "system_id")?;
        if system_id.trim().is_empty() {
            return Err(OscalError::invalid_argument("system_id must not be empty"));
        }
        let created_at = parse_timestamp(required_str(payload, "created_at")?)?;

        Ok(Self {
            system_name: system_name.to_string(),
            system_id: system_id.to_string(),
            created_at,
        })
    }

    /// The `{system_name, system_id, created_at}` object written on export.
    pub fn to_export_payload(&self) -> OscalResult<Value> {
        Ok(json!({
            "system_name": self.system_name,
            "system_id": self.system_id,
            "created_at": format_timestamp(self.created_at)?,
        }))
    }
}

/// Render a timestamp as RFC 3339.
pub fn format_timestamp(ts: OffsetDateTime) -> OscalResult<String> {
    ts.format(&Rfc3339)
        .map_err(|e| OscalError::serialization(format!("failed to format timestamp: {e}")))
}

/// Parse an ISO-8601 timestamp; values without an offset are taken as UTC.
///
/// Accepts RFC 3339, offset-less date-times, a space instead of `T` between
/// date and time, and a bare date (midnight UTC).
pub fn parse_timestamp(s: &str) -> OscalResult<OffsetDateTime> {
    let s = s.trim();
    if let Some(ts) = parse_date_time(s) {
        return Ok(ts);
    }
    if s.len() > 10 && s.as_bytes()[10] == b' ' && s.is_char_boundary(11) {
        if let Some(ts) = parse_date_time(&format!("{}T{}", &s[..10], &s[11..])) {
            return Ok(ts);
        }
    }
    Date::parse(s, &Iso8601::DEFAULT)
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| OscalError::invalid_argument(format!("created_at is not an ISO-8601 timestamp: {s}")))
}

fn parse_date_time(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(s, &Iso8601::DEFAULT))
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(s, &Iso8601::DEFAULT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
}

fn required_str<'a>(payload: &'a Map<String, Value>, key: &str) -> OscalResult<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| OscalError::invalid_argument(format!("{key} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn new_derives_id_from_trimmed_name() {
        let s = WorkspaceSnapshot::with_default_created_at("  Example System ").unwrap();
        assert_eq!(s.system_name, "Example System");
        assert_eq!(s.system_id, deterministic_id("Example System"));
        assert_eq!(s.created_at, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_matches!(
            WorkspaceSnapshot::with_default_created_at("   "),
            Err(OscalError::InvalidArgument(_))
        );
    }

    #[test]
    fn payload_requires_all_fields() {
        let err = WorkspaceSnapshot::from_payload(&obj(json!({"system_name": "Demo"}))).unwrap_err();
        assert_eq!(err.to_string(), "system_id is required");
    }

    #[test]
    fn payload_rejects_bad_timestamp() {
        let p = obj(json!({"system_name": "Demo", "system_id": "abc", "created_at": "yesterday"}));
        assert_matches!(WorkspaceSnapshot::from_payload(&p), Err(OscalError::InvalidArgument(_)));
    }

    #[test]
    fn accepts_offset_and_naive_timestamps() {
        let a = parse_timestamp("2026-01-19T00:00:00+00:00").unwrap();
        let b = parse_timestamp("2026-01-19T00:00:00Z").unwrap();
        let c = parse_timestamp("2026-01-19T00:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn accepts_space_separator_and_bare_date() {
        let t = parse_timestamp("2026-01-19T10:00:00Z").unwrap();
        assert_eq!(parse_timestamp("2026-01-19 10:00:00").unwrap(), t);
        assert_eq!(parse_timestamp("2026-01-19 10:00:00+00:00").unwrap(), t);

        let midnight = parse_timestamp("2026-01-19T00:00:00Z").unwrap();
        assert_eq!(parse_timestamp("2026-01-19").unwrap(), midnight);

        let p = obj(json!({"system_name": "Demo", "system_id": "abc", "created_at": "2026-01-19"}));
        assert_eq!(WorkspaceSnapshot::from_payload(&p).unwrap().created_at, midnight);

        assert_matches!(parse_timestamp("2026-01-19 noon"), Err(OscalError::InvalidArgument(_)));
    }

    #[test]
    fn export_payload_round_trips() {
        let created = parse_timestamp("2026-01-19T10:30:00Z").unwrap();
        let s = WorkspaceSnapshot::new("Demo", created).unwrap();
        let v = s.to_export_payload().unwrap();
        assert_eq!(v["created_at"], "2026-01-19T10:30:00Z");
        let back = WorkspaceSnapshot::from_payload(v.as_object().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
