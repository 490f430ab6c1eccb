use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use oscal_core::validate::Finding;
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Print `value` as JSON in JSON mode, otherwise run `human`.
pub fn emit<T, F>(value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&mut StandardStream) -> io::Result<()>,
{
    if is_json() {
        let s = serde_json::to_string_pretty(value)?;
        println!("{s}");
        return Ok(());
    }
    let mut out = stdout();
    human(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Write findings one per line, severity colored.
pub fn write_findings(out: &mut StandardStream, findings: &[Finding]) -> io::Result<()> {
    if findings.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "ok")?;
        return out.reset();
    }
    for f in findings {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", f.severity)?;
        out.reset()?;
        writeln!(out, " {}: {}", f.location, f.message)?;
    }
    Ok(())
}

/// Report a command failure on stderr.
pub fn error(err: &anyhow::Error) {
    if is_json() {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        let _ = writeln!(io::stderr(), "{body}");
        return;
    }
    let mut err_out = StandardStream::stderr(ColorChoice::Auto);
    let _ = err_out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(err_out, "error");
    let _ = err_out.reset();
    let _ = writeln!(err_out, ": {err:#}");
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
