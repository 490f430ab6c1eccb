use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use oscal_core::parse::parse_json_bytes;
use serde_json::{Map, Value};

pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read a JSON file under a size limit.
pub fn read_json_file<P: AsRef<Path>>(path: P, max_bytes: usize) -> Result<Value> {
    let raw = read_bytes(path)?;
    Ok(parse_json_bytes(&raw, max_bytes)?)
}

/// Read a file that must hold a non-empty JSON object.
///
/// Errors name the file the way an upload form would.
pub fn read_json_object<P: AsRef<Path>>(path: P, max_bytes: usize) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let name = file_label(path);
    let raw = read_bytes(path)?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(anyhow!("{name} is empty."));
    }
    if raw.len() > max_bytes {
        return Err(anyhow!("{name} is too large ({} bytes > limit {max_bytes}).", raw.len()));
    }
    match serde_json::from_slice(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(anyhow!("{name} must be a JSON object.")),
        Err(_) => Err(anyhow!("{name} is not valid JSON.")),
    }
}

pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}
