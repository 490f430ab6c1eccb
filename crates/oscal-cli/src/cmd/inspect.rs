use std::io::Write;
use std::path::Path;

use anyhow::Result;
use oscal_core::hash::{hash_bytes_hex, hash_canonical_json_hex};
use oscal_core::parse::{detect_kind, parse_json_bytes, DocumentKind};
use serde::Serialize;

use super::Context;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct InspectOut {
    pub kind: DocumentKind,
    pub bytes: usize,
    /// Digest of the raw file.
    pub sha256: String,
    /// Digest of the compact canonical encoding; stable across formatting.
    pub canonical_sha256: String,
}

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let raw = input::read_bytes(path)?;
    let value = parse_json_bytes(&raw, ctx.max_json_bytes())?;
    let out = InspectOut {
        kind: detect_kind(&value),
        bytes: raw.len(),
        sha256: hash_bytes_hex(&raw),
        canonical_sha256: hash_canonical_json_hex(&value)?,
    };
    output::emit(&out, |w| {
        writeln!(w, "kind:             {}", out.kind)?;
        writeln!(w, "bytes:            {}", out.bytes)?;
        writeln!(w, "sha256:           {}", out.sha256)?;
        writeln!(w, "canonical sha256: {}", out.canonical_sha256)
    })
}
