//! Operation: list the merged catalog before any narrowing.

use std::fmt;
use std::path::Path;

use airdep_core::config::GlobalConfig;
use airdep_resolver::resolver;
use airdep_resolver::version::parse_version;
use airdep_util::errors::AirdepError;

/// One package and its available versions, highest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageListing {
    pub name: String,
    pub versions: Vec<String>,
}

impl fmt::Display for PackageListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.versions.join(", "))
    }
}

/// List every package in the catalog, or just `package`.
pub fn list(
    manifest_path: &Path,
    config: &GlobalConfig,
    package: Option<&str>,
) -> miette::Result<Vec<PackageListing>> {
    let (_, catalog) = crate::load_catalog(manifest_path, config)?;
    resolver::validate(&catalog)?;

    if let Some(name) = package {
        if !catalog.contains(name) {
            return Err(AirdepError::UnknownPackage {
                package: name.to_string(),
            }
            .into());
        }
    }

    let mut listings = Vec::new();
    for (name, versions) in catalog.iter() {
        if package.is_some_and(|p| p != name.as_str()) {
            continue;
        }
        let mut parsed = Vec::with_capacity(versions.len());
        for key in versions.keys() {
            parsed.push((parse_version(name, key)?, key.clone()));
        }
        parsed.sort_by(|a, b| b.0.cmp(&a.0));
        listings.push(PackageListing {
            name: name.clone(),
            versions: parsed.into_iter().map(|(_, key)| key).collect(),
        });
    }
    Ok(listings)
}
