//! Command dispatch and handler modules.

mod list;
mod resolve;
mod tree;

use std::path::PathBuf;

use airdep_core::config::GlobalConfig;
use airdep_util::errors::AirdepError;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli, config: &GlobalConfig) -> Result<()> {
    let manifest = manifest_path(cli.manifest)?;
    tracing::debug!("Using manifest {}", manifest.display());
    match cli.command {
        Command::Resolve { output } => resolve::exec(&manifest, config, output, cli.verbose),
        Command::Tree {
            depth,
            why,
            inverted,
        } => tree::exec(&manifest, config, depth, why, inverted),
        Command::List { package } => list::exec(&manifest, config, package.as_deref()),
    }
}

fn manifest_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(AirdepError::Io)?;
    airdep_ops::locate_manifest(explicit.as_deref(), &cwd)
}
