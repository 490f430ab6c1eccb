use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "oscal-wizard", version, about = "OSCAL SSP wizard CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Store root directory holding workspaces.db.
    #[arg(long, global = true, default_value = ".oscal-wizard")]
    pub store_root: PathBuf,

    /// Directory with manifest.json and downloaded catalogs.
    #[arg(long, global = true, env = "OSCAL_WIZARD_CATALOG_DIR", default_value = "catalogs")]
    pub catalog_dir: PathBuf,

    /// Reject JSON inputs larger than this many bytes.
    #[arg(long, global = true, default_value_t = oscal_core::parse::DEFAULT_MAX_JSON_BYTES)]
    pub max_json_bytes: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate a workspace or SSP JSON file (detected from its content).
    Validate { file: PathBuf },

    /// Validate an SSP JSON file against the SSP document shape.
    ValidateSsp { file: PathBuf },

    /// Export a workspace JSON file as an OSCAL SSP document.
    ExportSsp {
        workspace: PathBuf,
        /// Write the SSP here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Unified diff of two JSON files plus narrative changes.
    Diff { before: PathBuf, after: PathBuf },

    /// List catalog controls from the manifest's first catalog.
    Catalog {
        /// Case-insensitive control id prefix.
        #[arg(long, default_value = "")]
        prefix: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Review control interview responses (JSON map of control id to {selected, narrative}).
    Interview {
        responses: PathBuf,
        #[arg(long, default_value = "")]
        prefix: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Read component-definition files and optionally import them into a workspace.
    Components {
        dir: PathBuf,
        /// Workspace JSON file to import the components into.
        #[arg(long)]
        workspace: Option<PathBuf>,
        /// Where to write the updated workspace (default: stdout).
        #[arg(long, requires = "workspace")]
        out: Option<PathBuf>,
    },

    /// Classify a JSON document and print its digests.
    Inspect { file: PathBuf },

    /// Deterministic 32-hex id for a seed.
    Id { seed: String },

    /// Deterministic UUID for a list of parts.
    Uuid {
        #[arg(required = true)]
        parts: Vec<String>,
    },

    /// Manage stored workspaces.
    Workspace {
        #[command(subcommand)]
        action: WorkspaceCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum WorkspaceCommand {
    /// Create a workspace record named NAME.
    Create {
        name: String,
        #[arg(long)]
        owner: Option<String>,
    },

    /// Import a workspace snapshot file.
    Import { file: PathBuf },

    /// Export a stored workspace as a snapshot file.
    Export {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List workspaces, most recently updated first.
    List,

    Rename { id: String, name: String },

    Delete { id: String },
}
