use std::io::Write;

use anyhow::Result;
use oscal_core::ids::{deterministic_id, deterministic_uuid};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct IdOut {
    pub id: String,
}

pub fn run_id(seed: &str) -> Result<()> {
    let out = IdOut {
        id: deterministic_id(seed),
    };
    output::emit(&out, |w| writeln!(w, "{}", out.id))
}

pub fn run_uuid(parts: &[String]) -> Result<()> {
    let out = IdOut {
        id: deterministic_uuid(parts),
    };
    output::emit(&out, |w| writeln!(w, "{}", out.id))
}
