pub mod ops_list;
pub mod ops_resolve;
pub mod ops_tree;

use std::path::{Path, PathBuf};

use airdep_core::catalog::Catalog;
use airdep_core::config::GlobalConfig;
use airdep_core::manifest::Manifest;
use airdep_core::MANIFEST_FILE;
use airdep_util::errors::AirdepError;

/// Locate the manifest to operate on.
///
/// An explicit path is used as given. Otherwise `airdep.json` is searched
/// for in `cwd` and its ancestors.
pub fn locate_manifest(explicit: Option<&Path>, cwd: &Path) -> miette::Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AirdepError::Manifest {
                message: format!("No manifest at {}", path.display()),
            }
            .into());
        }
        return Ok(path.to_path_buf());
    }
    airdep_util::fs::find_ancestor_with(cwd, MANIFEST_FILE)
        .map(|dir| dir.join(MANIFEST_FILE))
        .ok_or_else(|| {
            AirdepError::Manifest {
                message: format!(
                    "Could not find {MANIFEST_FILE} in {} or any parent directory",
                    cwd.display()
                ),
            }
            .into()
        })
}

/// Parse the manifest and load every repository it declares.
pub fn load_catalog(manifest_path: &Path, config: &GlobalConfig) -> miette::Result<(Manifest, Catalog)> {
    let manifest = Manifest::from_path(manifest_path)?;
    tracing::info!(
        "Loaded {} ({} roots, {} repositories)",
        manifest_path.display(),
        manifest.wants.len(),
        manifest.repositories.len()
    );
    let catalog = Catalog::load(&manifest, &config.values)?;
    Ok((manifest, catalog))
}
