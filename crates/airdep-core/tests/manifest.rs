use std::path::{Path, PathBuf};

use airdep_core::manifest::Manifest;
use airdep_core::repository::RepositorySource;
use tempfile::TempDir;

#[test]
fn test_parse_wants_in_declaration_order() {
    let manifest = Manifest::from_str(
        r#"{"wants": {"zeta": "*", "alpha": "^1.0.0", "mid": ">=2.0.0"}}"#,
        Path::new("."),
    )
    .unwrap();
    assert_eq!(manifest.root_names(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(manifest.wants[1].1, "^1.0.0");
    assert!(manifest.repositories.is_empty());
}

#[test]
fn test_parse_repositories_with_values() {
    let manifest = Manifest::from_str(
        r#"{
            "repositories": {
                "second": [{"file": "b/index.json"}, {"root": "/b"}],
                "first": [{"file": "a/index.json"}]
            }
        }"#,
        Path::new("/proj"),
    )
    .unwrap();
    assert_eq!(manifest.repositories.len(), 2);
    assert_eq!(manifest.repositories[0].name, "second");
    assert_eq!(
        manifest.repositories[0].source,
        RepositorySource::File(PathBuf::from("b/index.json"))
    );
    assert_eq!(manifest.repositories[0].values["root"], "/b");
    assert!(manifest.repositories[1].values.is_empty());
    assert_eq!(manifest.base_dir, PathBuf::from("/proj"));
}

#[test]
fn test_unknown_source_type_is_error() {
    let err = Manifest::from_str(
        r#"{"repositories": {"r": [{"http": "https://x"}, {}]}}"#,
        Path::new("."),
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid source"), "got: {err}");
}

#[test]
fn test_non_string_constraint_is_error() {
    let err = Manifest::from_str(r#"{"wants": {"app": 1}}"#, Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("'app'"), "got: {err}");
}

#[test]
fn test_non_string_values_are_error() {
    let err = Manifest::from_str(
        r#"{"repositories": {"r": [{"file": "i.json"}, {"n": 3}]}}"#,
        Path::new("."),
    )
    .unwrap_err();
    assert!(err.to_string().contains("values"), "got: {err}");
}

#[test]
fn test_repository_entry_must_be_array() {
    let err = Manifest::from_str(
        r#"{"repositories": {"r": {"file": "i.json"}}}"#,
        Path::new("."),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Repository 'r'"), "got: {err}");
}

#[test]
fn test_from_path_uses_manifest_directory() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("airdep.json");
    std::fs::write(&path, r#"{"wants": {"app": "*"}}"#).unwrap();
    let manifest = Manifest::from_path(&path).unwrap();
    assert_eq!(manifest.base_dir, tmp.path());
}

#[test]
fn test_from_path_missing_file_is_manifest_error() {
    let tmp = TempDir::new().unwrap();
    let err = Manifest::from_path(&tmp.path().join("airdep.json")).unwrap_err();
    assert!(err.to_string().starts_with("Manifest error"), "got: {err}");
}
