use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use airdep_core::catalog::Catalog;
use airdep_core::manifest::Manifest;
use airdep_core::record::PackageRecord;
use airdep_core::value::Value;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn url_of(catalog: &Catalog, package: &str, version: &str) -> Option<String> {
    catalog
        .get(package, version)?
        .get("url")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[test]
fn test_load_merges_repositories_last_write_wins_per_version() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "base/index.json",
        r#"{"package-files": {"lib": "lib.json"}}"#,
    );
    write(
        tmp.path(),
        "base/lib.json",
        r#"{"1.0.0": {"url": "base-1.0"}, "1.1.0": {"url": "base-1.1"}}"#,
    );
    write(
        tmp.path(),
        "overlay/index.json",
        r#"{"package-files": {"lib": "pkgs/lib.json"}}"#,
    );
    write(
        tmp.path(),
        "overlay/pkgs/lib.json",
        r#"{"1.1.0": {"url": "overlay-1.1"}, "2.0.0": {"url": "overlay-2.0"}}"#,
    );
    write(
        tmp.path(),
        "airdep.json",
        r#"{
            "wants": {"lib": "*"},
            "repositories": {
                "base": [{"file": "base/index.json"}, {}],
                "overlay": [{"file": "overlay/index.json"}, {}]
            }
        }"#,
    );

    let manifest = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap();
    let catalog = Catalog::load(&manifest, &BTreeMap::new()).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.version_count(), 3);
    assert_eq!(url_of(&catalog, "lib", "1.0.0").as_deref(), Some("base-1.0"));
    assert_eq!(url_of(&catalog, "lib", "1.1.0").as_deref(), Some("overlay-1.1"));
    assert_eq!(url_of(&catalog, "lib", "2.0.0").as_deref(), Some("overlay-2.0"));
}

#[test]
fn test_load_applies_repository_values_over_defaults() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "repo/index.json",
        r#"{"package-files": {"app": "app.json"}}"#,
    );
    write(
        tmp.path(),
        "repo/app.json",
        r#"{"1.0.0": {"url": "{mirror}/{name}-1.0.0", "raw": "{unset}"}}"#,
    );
    write(
        tmp.path(),
        "airdep.json",
        r#"{"repositories": {"main": [{"file": "repo/index.json"}, {"name": "app"}]}}"#,
    );

    let mut defaults = BTreeMap::new();
    defaults.insert("mirror".to_string(), "https://m".to_string());
    defaults.insert("name".to_string(), "overridden".to_string());

    let manifest = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap();
    let catalog = Catalog::load(&manifest, &defaults).unwrap();
    assert_eq!(
        url_of(&catalog, "app", "1.0.0").as_deref(),
        Some("https://m/app-1.0.0")
    );
    assert_eq!(
        catalog
            .get("app", "1.0.0")
            .and_then(|r| r.get("raw"))
            .and_then(Value::as_str),
        Some("{unset}")
    );
}

#[test]
fn test_repository_without_package_files_is_empty() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "repo/index.json", r#"{}"#);
    write(
        tmp.path(),
        "airdep.json",
        r#"{"repositories": {"empty": [{"file": "repo/index.json"}]}}"#,
    );
    let manifest = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap();
    let catalog = Catalog::load(&manifest, &BTreeMap::new()).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_missing_package_file_is_repository_error() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "repo/index.json",
        r#"{"package-files": {"gone": "gone.json"}}"#,
    );
    write(
        tmp.path(),
        "airdep.json",
        r#"{"repositories": {"r": [{"file": "repo/index.json"}]}}"#,
    );
    let manifest = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap();
    let err = Catalog::load(&manifest, &BTreeMap::new()).unwrap_err();
    assert!(err.to_string().starts_with("Repository error"), "got: {err}");
}

#[test]
fn test_insert_returns_replaced_record() {
    let mut catalog = Catalog::new();
    assert!(catalog
        .insert("lib", "1.0.0", PackageRecord::default())
        .is_none());
    let mut attrs = BTreeMap::new();
    attrs.insert("url".to_string(), Value::from("new"));
    let previous = catalog.insert("lib", "1.0.0", PackageRecord::new(attrs));
    assert_eq!(previous, Some(PackageRecord::default()));
    assert_eq!(url_of(&catalog, "lib", "1.0.0").as_deref(), Some("new"));
    assert!(catalog.contains("lib"));
    assert!(!catalog.contains("other"));
}

#[test]
fn test_package_without_versions_is_skipped() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "repo/index.json",
        r#"{"package-files": {"hollow": "hollow.json", "real": "real.json"}}"#,
    );
    write(tmp.path(), "repo/hollow.json", r#"{}"#);
    write(tmp.path(), "repo/real.json", r#"{"0.1.0": {}}"#);
    write(
        tmp.path(),
        "airdep.json",
        r#"{"repositories": {"r": [{"file": "repo/index.json"}]}}"#,
    );
    let manifest = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap();
    let catalog = Catalog::load(&manifest, &BTreeMap::new()).unwrap();
    assert!(!catalog.contains("hollow"));
    assert!(catalog.contains("real"));
}

#[test]
fn test_index_key_names_the_package() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "repo/index.json",
        r#"{"package-files": {"lib": "files/any-name.json", "util": "files/util.json"}}"#,
    );
    write(
        tmp.path(),
        "repo/files/any-name.json",
        r#"{"1.0.0": {"url": "u1"}, "2.0.0": {"url": "u2"}}"#,
    );
    write(tmp.path(), "repo/files/util.json", r#"{"0.1.0": {}}"#);
    write(
        tmp.path(),
        "airdep.json",
        r#"{"repositories": {"r": [{"file": "repo/index.json"}]}}"#,
    );
    let manifest = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap();
    let catalog = Catalog::load(&manifest, &BTreeMap::new()).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.version_count(), 3);
    assert_eq!(url_of(&catalog, "lib", "1.0.0").as_deref(), Some("u1"));
    assert_eq!(url_of(&catalog, "lib", "2.0.0").as_deref(), Some("u2"));
    assert!(catalog.contains("util"));
    assert!(!catalog.contains("any-name"));
}
