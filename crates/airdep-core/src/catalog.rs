//! The catalog: every known `(package, version)` record available to a run.
//!
//! A catalog is built once by merging repositories, then handed by value to
//! a resolution run, which only ever removes versions from it.

use std::collections::BTreeMap;

use airdep_util::errors::AirdepError;

use crate::manifest::Manifest;
use crate::package_file::PackageFile;
use crate::record::PackageRecord;
use crate::repository::Repository;
use crate::substitution::layered;

/// Package name to version string to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    packages: BTreeMap<String, BTreeMap<String, PackageRecord>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every repository a manifest declares, in declaration order.
    ///
    /// `defaults` are substitution values applied beneath each repository's
    /// own values.
    pub fn load(manifest: &Manifest, defaults: &BTreeMap<String, String>) -> Result<Self, AirdepError> {
        let mut catalog = Self::new();
        for decl in &manifest.repositories {
            let vars = layered(defaults, &decl.values);
            let repo = Repository::load(&decl.name, &decl.source, &manifest.base_dir, &vars)?;
            catalog.merge_repository(&repo);
        }
        tracing::info!(
            "Catalog holds {} packages ({} versions)",
            catalog.len(),
            catalog.version_count()
        );
        Ok(catalog)
    }

    /// Insert one record. An existing record for the same version is replaced
    /// and returned.
    pub fn insert(
        &mut self,
        package: impl Into<String>,
        version: impl Into<String>,
        record: PackageRecord,
    ) -> Option<PackageRecord> {
        let package = package.into();
        let version = version.into();
        let previous = self
            .packages
            .entry(package.clone())
            .or_default()
            .insert(version.clone(), record);
        if previous.is_some() {
            tracing::debug!("{package}@{version} overwritten by a later source");
        }
        previous
    }

    /// Merge one package file; later records win per version.
    ///
    /// A file without any version is skipped so that every package present
    /// in the catalog has at least one version.
    pub fn merge_package_file(&mut self, file: &PackageFile) {
        if file.versions.is_empty() {
            tracing::warn!(
                "Package '{}' in {} defines no versions, skipping",
                file.package,
                file.path.display()
            );
            return;
        }
        for (version, record) in &file.versions {
            self.insert(file.package.clone(), version.clone(), record.clone());
        }
    }

    /// Merge every package file of a repository, in index order.
    pub fn merge_repository(&mut self, repo: &Repository) {
        for file in &repo.package_files {
            self.merge_package_file(file);
        }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    pub fn versions(&self, package: &str) -> Option<&BTreeMap<String, PackageRecord>> {
        self.packages.get(package)
    }

    pub fn versions_mut(&mut self, package: &str) -> Option<&mut BTreeMap<String, PackageRecord>> {
        self.packages.get_mut(package)
    }

    pub fn get(&self, package: &str, version: &str) -> Option<&PackageRecord> {
        self.packages.get(package)?.get(version)
    }

    /// Iterate packages in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, PackageRecord>)> {
        self.packages.iter()
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of `(package, version)` records.
    pub fn version_count(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }
}
