use std::collections::BTreeMap;
use std::path::Path;

use airdep_util::errors::AirdepError;
use serde::{Deserialize, Serialize};

use crate::record::{ResolvedSet, WANTS_KEY};
use crate::value::Value;

/// The persisted result of a resolution run (`airbuild.json`).
///
/// Each package's `wants` is flattened from a constraint mapping into the
/// sorted list of dependency names; constraints have done their job by the
/// time this is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    /// Root package names, in manifest order.
    pub wants: Vec<String>,
    pub packages: BTreeMap<String, BTreeMap<String, Value>>,
}

impl BuildManifest {
    /// Assemble a build manifest from the roots and the resolved set.
    pub fn generate<'a>(
        roots: impl IntoIterator<Item = &'a str>,
        resolved: &ResolvedSet,
    ) -> Result<Self, AirdepError> {
        let mut packages = BTreeMap::new();
        for (name, record) in resolved {
            let names = record.dependency_names(name)?;
            let mut attributes = record.attributes().clone();
            if attributes.contains_key(WANTS_KEY) {
                attributes.insert(
                    WANTS_KEY.to_string(),
                    Value::Sequence(names.into_iter().map(Value::String).collect()),
                );
            }
            packages.insert(name.clone(), attributes);
        }

        Ok(Self {
            wants: roots.into_iter().map(str::to_string).collect(),
            packages,
        })
    }

    /// Load and parse a previously written build manifest.
    pub fn from_path(path: &Path) -> Result<Self, AirdepError> {
        let content = std::fs::read_to_string(path).map_err(|e| AirdepError::Generic {
            message: format!("Failed to read build manifest: {e}"),
        })?;
        serde_json::from_str(&content).map_err(|e| AirdepError::Generic {
            message: format!("Failed to parse build manifest: {e}"),
        })
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    pub fn to_string_pretty(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Write the build manifest to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), AirdepError> {
        let content = self.to_string_pretty().map_err(|e| AirdepError::Generic {
            message: format!("Failed to serialize build manifest: {e}"),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Dependency names recorded for `package`, if it was resolved.
    pub fn dependencies_of(&self, package: &str) -> Option<Vec<&str>> {
        let attrs = self.packages.get(package)?;
        Some(
            attrs
                .get(WANTS_KEY)
                .and_then(Value::as_sequence)
                .map(|deps| deps.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default(),
        )
    }
}
