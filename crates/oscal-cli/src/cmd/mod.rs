use std::path::PathBuf;

use anyhow::Result;
use oscal_core::catalog::CatalogPaths;
use oscal_core::config::{validate_config, CoreConfig};
use thiserror::Error;

use crate::args::{Cli, Command};

mod catalog;
mod components;
mod diff;
mod export_ssp;
mod ids;
mod inspect;
mod interview;
mod validate;
mod workspace;

/// Returned when a command printed findings; the process exits with 1.
#[derive(Debug, Error)]
#[error("{0} finding(s) reported")]
pub struct FindingsReported(pub usize);

/// Settings resolved from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub core: CoreConfig,
    pub catalog: CatalogPaths,
    pub store_root: PathBuf,
}

impl Context {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut core = CoreConfig::default();
        core.limits.max_json_bytes = cli.max_json_bytes;
        validate_config(&core)?;
        Ok(Self {
            core,
            catalog: CatalogPaths::new(&cli.catalog_dir),
            store_root: cli.store_root.clone(),
        })
    }

    pub fn max_json_bytes(&self) -> usize {
        self.core.limits.max_json_bytes
    }
}

pub fn findings_result(count: usize) -> Result<()> {
    if count == 0 {
        Ok(())
    } else {
        Err(FindingsReported(count).into())
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Command::Validate { file } => validate::run(&ctx, &file),
        Command::ValidateSsp { file } => validate::run_ssp(&ctx, &file),
        Command::ExportSsp { workspace, out } => export_ssp::run(&ctx, &workspace, out.as_deref()),
        Command::Diff { before, after } => diff::run(&ctx, &before, &after),
        Command::Catalog { prefix, limit } => catalog::run(&ctx, &prefix, limit),
        Command::Interview { responses, prefix, limit } => interview::run(&ctx, &responses, &prefix, limit),
        Command::Components { dir, workspace, out } => {
            components::run(&ctx, &dir, workspace.as_deref(), out.as_deref())
        }
        Command::Inspect { file } => inspect::run(&ctx, &file),
        Command::Id { seed } => ids::run_id(&seed),
        Command::Uuid { parts } => ids::run_uuid(&parts),
        Command::Workspace { action } => workspace::run(&ctx, action),
    }
}
