//! Diagnostic logging on stderr.
//!
//! Filter comes from `RUST_LOG` (default `warn`). With `--json` the events
//! are written as JSON lines so they can be collected next to JSON output.
//! Audit events use the `audit` target, e.g. `RUST_LOG=audit=info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests); keep it.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.with_target(true).try_init()
    };
}
