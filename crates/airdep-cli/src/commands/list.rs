//! Handler for `airdep list`.

use std::path::Path;

use airdep_core::config::GlobalConfig;
use airdep_ops::ops_list;
use miette::Result;

pub fn exec(manifest: &Path, config: &GlobalConfig, package: Option<&str>) -> Result<()> {
    let listings = ops_list::list(manifest, config, package)?;
    if listings.is_empty() {
        println!("No packages in the catalog.");
    }
    for listing in listings {
        println!("{listing}");
    }
    Ok(())
}
