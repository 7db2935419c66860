//! Handler for `airdep tree`.

use std::path::Path;

use airdep_core::config::GlobalConfig;
use airdep_ops::ops_tree::{self, TreeOptions};
use miette::Result;

pub fn exec(
    manifest: &Path,
    config: &GlobalConfig,
    depth: Option<u32>,
    why: Option<String>,
    inverted: Option<String>,
) -> Result<()> {
    let opts = TreeOptions {
        depth: depth.map(|d| d as usize),
        why,
        inverted,
    };
    print!("{}", ops_tree::tree(manifest, config, &opts)?);
    Ok(())
}
