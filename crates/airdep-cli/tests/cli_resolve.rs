use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn airdep_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("airdep").unwrap();
    cmd.env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("AIRDEP_MANIFEST");
    cmd
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_project(dir: &Path, root_constraint: &str) {
    write(
        dir,
        "repo/index.json",
        r#"{"package-files": {"app": "app.json", "lib": "lib.json"}}"#,
    );
    write(
        dir,
        "repo/app.json",
        r#"{"1.0.0": {"wants": {"lib": "^1.0.0"}}}"#,
    );
    write(
        dir,
        "repo/lib.json",
        r#"{"1.0.0": {"url": "{host}/lib-1.0.0"}, "1.2.0": {"url": "{host}/lib-1.2.0"}, "2.0.0": {}}"#,
    );
    write(
        dir,
        "airdep.json",
        &format!(
            r#"{{
                "wants": {{"app": "{root_constraint}"}},
                "repositories": {{"main": [{{"file": "repo/index.json"}}, {{"host": "https://pkgs"}}]}}
            }}"#
        ),
    );
}

#[test]
fn test_resolve_writes_airbuild() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    setup_project(tmp.path(), "*");

    airdep_cmd(home.path())
        .current_dir(tmp.path())
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 2 packages"));

    let build = fs::read_to_string(tmp.path().join("airbuild.json")).unwrap();
    assert!(build.contains("https://pkgs/lib-1.2.0"));
    assert!(!build.contains("lib-1.0.0"));
    assert!(build.contains("\"wants\": [\n        \"lib\"\n      ]"));
}

#[test]
fn test_resolve_from_subdirectory_and_custom_output() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    setup_project(tmp.path(), "*");
    let nested = tmp.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    airdep_cmd(home.path())
        .current_dir(&nested)
        .args(["resolve", "-o"])
        .arg(tmp.path().join("custom.json"))
        .assert()
        .success();

    assert!(tmp.path().join("custom.json").is_file());
    assert!(!tmp.path().join("airbuild.json").exists());
}

#[test]
fn test_resolve_with_config_output() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    setup_project(tmp.path(), "*");
    write(
        home.path(),
        ".airdep/config.toml",
        "[output]\nfile = \"resolved.json\"\n",
    );

    airdep_cmd(home.path())
        .current_dir(tmp.path())
        .arg("resolve")
        .assert()
        .success();

    assert!(tmp.path().join("resolved.json").is_file());
}

#[test]
fn test_resolve_unsatisfiable_fails() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    setup_project(tmp.path(), ">2.0.0");

    airdep_cmd(home.path())
        .current_dir(tmp.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No versions of 'app'"));

    assert!(!tmp.path().join("airbuild.json").exists());
}

#[test]
fn test_resolve_verbose_prints_report() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    setup_project(tmp.path(), "*");

    airdep_cmd(home.path())
        .current_dir(tmp.path())
        .args(["resolve", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("lib ^1.0.0 (from app): removed 2.0.0"));
}

#[test]
fn test_missing_manifest_fails() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();

    airdep_cmd(home.path())
        .current_dir(tmp.path())
        .args(["--manifest", "nowhere/airdep.json", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No manifest at"));
}

#[test]
fn test_bad_config_fails() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    setup_project(tmp.path(), "*");
    write(home.path(), ".airdep/config.toml", "[output\n");

    airdep_cmd(home.path())
        .current_dir(tmp.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}
