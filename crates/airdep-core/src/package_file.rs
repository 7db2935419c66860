//! Package files: JSON documents describing every version of one package.
//!
//! A package file is `{version: record}`; the package it describes is named
//! by the repository index entry that points at it. Duplicate version keys
//! are rejected while parsing, so a single file can never define the same
//! `(package, version)` twice.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use airdep_util::errors::AirdepError;
use serde::de::{Deserializer, Error as _, MapAccess, Visitor};
use serde::Deserialize;

use crate::record::PackageRecord;
use crate::substitution::substitute_value;
use crate::value::Value;

/// All versions of one package defined by one file, after substitution.
#[derive(Debug, Clone, Default)]
pub struct PackageFile {
    pub path: PathBuf,
    pub package: String,
    pub versions: BTreeMap<String, PackageRecord>,
}

impl PackageFile {
    /// Load the package file for `package` and apply `{key}` substitution
    /// to its string leaves.
    pub fn load(package: &str, path: &Path, vars: &BTreeMap<String, String>) -> Result<Self, AirdepError> {
        let content = std::fs::read_to_string(path).map_err(|e| AirdepError::Repository {
            message: format!("Failed to read package file {}: {e}", path.display()),
        })?;
        Self::parse(package, &content, path, vars)
    }

    /// Parse package file content; `path` is only used for diagnostics.
    pub fn parse(
        package: &str,
        content: &str,
        path: &Path,
        vars: &BTreeMap<String, String>,
    ) -> Result<Self, AirdepError> {
        let raw: UniqueKeys<Value> =
            serde_json::from_str(content).map_err(|e| AirdepError::Repository {
                message: format!("Failed to parse package file {}: {e}", path.display()),
            })?;

        let mut versions = BTreeMap::new();
        for (version, value) in raw.0 {
            let context = format!("{package}@{version} in {}", path.display());
            let value = substitute_value(value, vars);
            versions.insert(version, PackageRecord::from_value(value, &context)?);
        }

        Ok(Self {
            path: path.to_path_buf(),
            package: package.to_string(),
            versions,
        })
    }

    /// Number of version records in the file.
    pub fn record_count(&self) -> usize {
        self.versions.len()
    }
}

/// A string-keyed map that refuses duplicate keys.
struct UniqueKeys<V>(BTreeMap<String, V>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueKeys<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UniqueKeysVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeysVisitor<V> {
            type Value = UniqueKeys<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with unique keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    if map.contains_key(&key) {
                        return Err(A::Error::custom(format!("duplicate key '{key}'")));
                    }
                    map.insert(key, value);
                }
                Ok(UniqueKeys(map))
            }
        }

        deserializer.deserialize_map(UniqueKeysVisitor(PhantomData))
    }
}
