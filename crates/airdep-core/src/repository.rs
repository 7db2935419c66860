//! File-backed package repositories.
//!
//! A repository is an index file mapping each package name to the file
//! describing all of that package's versions:
//!
//! ```json
//! { "package-files": { "core": "core.json", "extra": "extra/packages.json" } }
//! ```
//!
//! Package file paths are relative to the index's directory. Files load in
//! the order the index lists them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use airdep_util::errors::AirdepError;
use airdep_util::fs::{parent_dir, resolve_relative};
use serde::{Deserialize, Serialize};

use crate::package_file::PackageFile;

/// Where a repository's index lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// A local index file, relative to the manifest directory.
    File(PathBuf),
}

impl RepositorySource {
    pub fn kind(&self) -> &'static str {
        match self {
            RepositorySource::File(_) => "file",
        }
    }
}

/// Raw shape of a repository index file.
#[derive(Debug, Deserialize)]
struct RepositoryIndex {
    #[serde(default, rename = "package-files")]
    package_files: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A loaded repository: its package files, already substituted.
#[derive(Debug, Clone)]
pub struct Repository {
    pub name: String,
    /// One file per package, in index order.
    pub package_files: Vec<PackageFile>,
}

impl Repository {
    /// Load a repository from `source`, resolving relative paths against
    /// `base_dir` and substituting `vars` into every package file.
    pub fn load(
        name: &str,
        source: &RepositorySource,
        base_dir: &Path,
        vars: &BTreeMap<String, String>,
    ) -> Result<Self, AirdepError> {
        match source {
            RepositorySource::File(index) => {
                let index_path = resolve_relative(base_dir, index);
                Self::load_index_file(name, &index_path, vars)
            }
        }
    }

    fn load_index_file(
        name: &str,
        index_path: &Path,
        vars: &BTreeMap<String, String>,
    ) -> Result<Self, AirdepError> {
        tracing::info!("Loading repository '{name}' from {}", index_path.display());

        let content = std::fs::read_to_string(index_path).map_err(|e| AirdepError::Repository {
            message: format!(
                "Failed to read index of repository '{name}' at {}: {e}",
                index_path.display()
            ),
        })?;
        let index: RepositoryIndex =
            serde_json::from_str(&content).map_err(|e| AirdepError::Repository {
                message: format!("Failed to parse index of repository '{name}': {e}"),
            })?;

        let Some(entries) = index.package_files else {
            tracing::warn!("Repository '{name}' has no package-files");
            return Ok(Self {
                name: name.to_string(),
                package_files: Vec::new(),
            });
        };

        let dir = parent_dir(index_path);
        let mut package_files = Vec::with_capacity(entries.len());
        for (package, rel) in entries {
            let rel = rel.as_str().ok_or_else(|| AirdepError::Repository {
                message: format!(
                    "Package file for '{package}' in repository '{name}' must be a path string"
                ),
            })?;
            let path = resolve_relative(dir, Path::new(rel));
            let file = PackageFile::load(&package, &path, vars)?;
            tracing::debug!(
                "Repository '{name}': loaded {} records from {}",
                file.record_count(),
                path.display()
            );
            package_files.push(file);
        }

        Ok(Self {
            name: name.to_string(),
            package_files,
        })
    }
}
