//! Core resolution algorithm: constraint narrowing along the want-graph,
//! followed by latest-version selection for every reachable package.
//!
//! A run owns its catalog. Root constraints are applied first, then each
//! root is walked depth-first: at every package the latest surviving
//! version is selected and all of its `wants` constraints are applied to
//! the sibling dependencies before descending into any of them. Once all
//! roots are walked the catalog is final, and a second walk picks one
//! record per reachable package.
//!
//! Known limitation: a package reached again through a cycle is not
//! revisited, so constraints that arrive late via a cycle edge do not
//! re-narrow that package's own dependencies.

use std::collections::BTreeMap;

use airdep_core::catalog::Catalog;
use airdep_core::record::{PackageRecord, ResolvedSet};
use airdep_util::errors::AirdepError;
use semver::Version;

use crate::ancestors::AncestorPath;
use crate::report::{Narrowing, NarrowingReport};
use crate::version::{parse_version, Constraint};

/// The output of a successful resolution run.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Exactly one record per package reachable from the roots.
    pub resolved: ResolvedSet,
    /// The version selected for each package in `resolved`.
    pub versions: BTreeMap<String, Version>,
    pub report: NarrowingReport,
}

/// A package's currently selected version and record.
#[derive(Debug, Clone)]
pub struct Selected<'a> {
    pub version: Version,
    pub record: &'a PackageRecord,
}

/// Resolve `root_wants` against `catalog`.
///
/// Fails on the first error; no partial result is ever returned.
pub fn resolve(mut catalog: Catalog, root_wants: &[(String, String)]) -> Result<Resolution, AirdepError> {
    validate(&catalog)?;

    let mut report = NarrowingReport::new();
    for (name, constraint) in root_wants {
        let removed = filter(&mut catalog, name, constraint)?;
        report.add(Narrowing {
            package: name.clone(),
            constraint: constraint.clone(),
            requested_by: None,
            removed,
        });
    }

    for (name, _) in root_wants {
        resolve_wants(&mut catalog, name, &AncestorPath::new(), &mut report)?;
    }

    let mut resolved = ResolvedSet::new();
    for (name, _) in root_wants {
        merge(&catalog, &mut resolved, name, &AncestorPath::new())?;
    }

    let mut versions = BTreeMap::new();
    for name in resolved.keys() {
        versions.insert(name.clone(), latest(&catalog, name)?.version);
    }

    tracing::info!(
        "Resolved {} packages ({} narrowing steps)",
        resolved.len(),
        report.len()
    );

    Ok(Resolution {
        resolved,
        versions,
        report,
    })
}

/// Check that every version key in the catalog is a valid semantic version.
pub fn validate(catalog: &Catalog) -> Result<(), AirdepError> {
    for (name, versions) in catalog.iter() {
        for version in versions.keys() {
            parse_version(name, version)?;
        }
    }
    Ok(())
}

/// Remove every version of `package` that does not satisfy `constraint`.
///
/// Returns the removed version strings. The catalog is left untouched if the
/// constraint or any version key is malformed.
pub fn filter(catalog: &mut Catalog, package: &str, constraint: &str) -> Result<Vec<String>, AirdepError> {
    let parsed = Constraint::parse(constraint)?;
    let versions = catalog
        .versions_mut(package)
        .ok_or_else(|| AirdepError::UnknownPackage {
            package: package.to_string(),
        })?;

    let mut removed = Vec::new();
    for key in versions.keys() {
        if !parsed.matches(&parse_version(package, key)?) {
            removed.push(key.clone());
        }
    }
    for key in &removed {
        versions.remove(key);
    }

    if versions.is_empty() {
        return Err(AirdepError::UnsatisfiableConstraint {
            package: package.to_string(),
            constraint: constraint.to_string(),
        });
    }

    if !removed.is_empty() {
        tracing::debug!(
            "{package} {constraint}: removed {}, {} left",
            removed.join(", "),
            versions.len()
        );
    }
    Ok(removed)
}

/// Select the highest surviving version of `package`.
pub fn latest<'a>(catalog: &'a Catalog, package: &str) -> Result<Selected<'a>, AirdepError> {
    let versions = catalog
        .versions(package)
        .ok_or_else(|| AirdepError::UnknownPackage {
            package: package.to_string(),
        })?;

    let mut best: Option<Selected<'a>> = None;
    for (key, record) in versions {
        let version = parse_version(package, key)?;
        let is_better = match &best {
            Some(current) => version > current.version,
            None => true,
        };
        if is_better {
            best = Some(Selected { version, record });
        }
    }

    best.ok_or_else(|| AirdepError::InvariantViolation {
        message: format!("no versions of '{package}' left to select from"),
    })
}

/// Narrow the catalog along every `wants` edge reachable from `package`.
pub fn resolve_wants(
    catalog: &mut Catalog,
    package: &str,
    ancestors: &AncestorPath,
    report: &mut NarrowingReport,
) -> Result<(), AirdepError> {
    if ancestors.contains(package) {
        tracing::debug!("cycle: {ancestors} -> {package}");
        return Ok(());
    }

    let wants = {
        let selected = latest(catalog, package)?;
        selected
            .record
            .wants(&format!("{package}@{}", selected.version))?
    };
    let Some(wants) = wants else {
        return Ok(());
    };

    // Every sibling is narrowed before any of them is descended into.
    for (dep, constraint) in &wants {
        let removed = filter(catalog, dep, constraint)?;
        report.add(Narrowing {
            package: dep.clone(),
            constraint: constraint.clone(),
            requested_by: Some(package.to_string()),
            removed,
        });
    }

    let path = ancestors.with(package);
    for dep in wants.keys() {
        resolve_wants(catalog, dep, &path, report)?;
    }
    Ok(())
}

/// Collect the selected record of `package` and everything it wants.
///
/// Must only run once the catalog is fully narrowed.
pub fn merge(
    catalog: &Catalog,
    resolved: &mut ResolvedSet,
    package: &str,
    ancestors: &AncestorPath,
) -> Result<(), AirdepError> {
    if ancestors.contains(package) {
        return Ok(());
    }
    // Selection is deterministic over a fixed catalog, so a package merged
    // once already has its whole subtree merged.
    if resolved.contains_key(package) {
        return Ok(());
    }

    let selected = latest(catalog, package)?;
    let deps = selected
        .record
        .dependency_names(&format!("{package}@{}", selected.version))?;
    resolved.insert(package.to_string(), selected.record.clone());

    let path = ancestors.with(package);
    for dep in &deps {
        merge(catalog, resolved, dep, &path)?;
    }
    Ok(())
}
