use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use airdep_util::errors::AirdepError;
use airdep_util::fs::parent_dir;
use serde::Deserialize;

use crate::repository::RepositorySource;

/// The parsed representation of an `airdep.json` file.
///
/// `wants` and `repositories` keep the order in which they are declared:
/// roots are resolved in that order and later repositories overwrite
/// earlier ones per `(package, version)`.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Root package name to constraint string.
    pub wants: Vec<(String, String)>,
    pub repositories: Vec<RepositoryDecl>,
    /// Directory relative repository paths are resolved against.
    pub base_dir: PathBuf,
}

/// One `repositories` entry: `"name": [ {"file": "index.json"}, {values} ]`.
#[derive(Debug, Clone)]
pub struct RepositoryDecl {
    pub name: String,
    pub source: RepositorySource,
    /// Substitution values for `{key}` tokens in this repository's files.
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    wants: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    repositories: serde_json::Map<String, serde_json::Value>,
}

impl Manifest {
    /// Load and parse an `airdep.json` file from the given path.
    pub fn from_path(path: &Path) -> Result<Self, AirdepError> {
        let content = std::fs::read_to_string(path).map_err(|e| AirdepError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content, parent_dir(path))
    }

    /// Parse manifest content; relative repository paths resolve against `base_dir`.
    pub fn from_str(content: &str, base_dir: &Path) -> Result<Self, AirdepError> {
        let raw: RawManifest = serde_json::from_str(content).map_err(|e| AirdepError::Manifest {
            message: format!("Failed to parse airdep.json: {e}"),
        })?;

        let mut wants = Vec::with_capacity(raw.wants.len());
        for (name, constraint) in raw.wants {
            let constraint = constraint.as_str().ok_or_else(|| AirdepError::Manifest {
                message: format!("Constraint for wanted package '{name}' must be a string"),
            })?;
            wants.push((name, constraint.to_string()));
        }

        let mut repositories = Vec::with_capacity(raw.repositories.len());
        for (name, entry) in raw.repositories {
            repositories.push(parse_repository(name, entry)?);
        }

        Ok(Self {
            wants,
            repositories,
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Root package names in declaration order.
    pub fn root_names(&self) -> Vec<&str> {
        self.wants.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Accepts `[source]` or `[source, values]`.
fn parse_repository(name: String, entry: serde_json::Value) -> Result<RepositoryDecl, AirdepError> {
    let bad = |detail: String| AirdepError::Manifest {
        message: format!("Repository '{name}': {detail}"),
    };

    let parts = match entry {
        serde_json::Value::Array(parts) if (1..=2).contains(&parts.len()) => parts,
        _ => {
            return Err(bad(
                "expected [source] or [source, values]".to_string(),
            ))
        }
    };
    let mut parts = parts.into_iter();

    let source = parts
        .next()
        .map(serde_json::from_value::<RepositorySource>)
        .transpose()
        .map_err(|e| bad(format!("invalid source: {e}")))?
        .ok_or_else(|| bad("missing source".to_string()))?;

    let values = parts
        .next()
        .map(serde_json::from_value::<BTreeMap<String, String>>)
        .transpose()
        .map_err(|e| bad(format!("values must be a map of strings: {e}")))?
        .unwrap_or_default();

    Ok(RepositoryDecl {
        name,
        source,
        values,
    })
}
