//! Package records: the attribute payload of one `(package, version)` pair.

use std::collections::BTreeMap;

use airdep_util::errors::AirdepError;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Reserved attribute holding a record's dependency constraints.
pub const WANTS_KEY: &str = "wants";

/// Dependency name to constraint string.
pub type Wants = BTreeMap<String, String>;

/// The output of a resolution run: exactly one record per package name.
pub type ResolvedSet = BTreeMap<String, PackageRecord>;

/// Attribute map attached to exactly one `(package, version)` pair.
///
/// Records are immutable once loaded. Resolution removes them from the
/// catalog wholesale but never edits their attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageRecord {
    attributes: BTreeMap<String, Value>,
}

impl PackageRecord {
    pub fn new(attributes: BTreeMap<String, Value>) -> Self {
        Self { attributes }
    }

    /// Convert an untyped value into a record; only mappings qualify.
    pub fn from_value(value: Value, context: &str) -> Result<Self, AirdepError> {
        Ok(Self::new(value.into_mapping(context)?))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// The record's `wants` attribute as dependency name to constraint.
    ///
    /// Returns `Ok(None)` when the record has no `wants`. Any other shape
    /// than a mapping of strings is a [`AirdepError::ValueShape`] error;
    /// `context` identifies the record in that error.
    pub fn wants(&self, context: &str) -> Result<Option<Wants>, AirdepError> {
        let Some(raw) = self.attributes.get(WANTS_KEY) else {
            return Ok(None);
        };
        let map = raw.expect_mapping(&format!("{context} wants"))?;
        let mut wants = Wants::new();
        for (dep, constraint) in map {
            let constraint = constraint.expect_str(&format!("{context} wants.{dep}"))?;
            wants.insert(dep.clone(), constraint.to_string());
        }
        Ok(Some(wants))
    }

    /// Names of the packages this record depends on, sorted.
    pub fn dependency_names(&self, context: &str) -> Result<Vec<String>, AirdepError> {
        Ok(self
            .wants(context)?
            .map(|w| w.into_keys().collect())
            .unwrap_or_default())
    }
}

impl From<BTreeMap<String, Value>> for PackageRecord {
    fn from(attributes: BTreeMap<String, Value>) -> Self {
        Self::new(attributes)
    }
}
