//! Handler for `airdep resolve`.

use std::path::{Path, PathBuf};

use airdep_core::config::GlobalConfig;
use airdep_ops::ops_resolve::{self, ResolveOptions};
use miette::Result;

pub fn exec(manifest: &Path, config: &GlobalConfig, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let opts = ResolveOptions { output, verbose };
    let outcome = ops_resolve::resolve(manifest, config, &opts)?;
    println!("Resolved {} packages", outcome.resolution.resolved.len());
    Ok(())
}
