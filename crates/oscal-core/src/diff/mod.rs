//! Diff engine.
//!
//! - [`unified_json_diff`]: line-oriented unified diff over pretty canonical JSON.
//! - [`narrative_html_diff`]: character-level diff with `<ins>`/`<del>` markup.
//! - [`collect_narrative_changes`]: walks two documents and diffs only the
//!   narrative string leaves that changed.

mod json_diff;
mod narrative;
mod narratives;

pub use json_diff::{unified_json_diff, AFTER_LABEL, BEFORE_LABEL};
pub use narrative::{escape_html, narrative_html_diff};
pub use narratives::{collect_narrative_changes, flatten_narratives, NarrativeChange};
