//! Config location, init, and base URL resolution through the CLI.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

// Port 9 (discard) refuses connections, so login fails right after printing
// the base URL it resolved.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn login_target(home: &Path, env_url: Option<&str>, flag_url: Option<&str>) -> String {
    let mut cmd = cargo_bin_cmd!("bantay");
    cmd.env("BANTAY_HOME", home).env_remove("BANTAY_BASE_URL");
    if let Some(url) = env_url {
        cmd.env("BANTAY_BASE_URL", url);
    }
    if let Some(url) = flag_url {
        cmd.args(["--base-url", url]);
    }
    let output = cmd
        .args(["login", "--email", "a@b.com", "--password-stdin"])
        .write_stdin("x\n")
        .output()
        .unwrap();
    assert!(!output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_config_path_and_init_live_under_bantay_home() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("bantay")
        .env("BANTAY_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config_path.display().to_string()));

    cargo_bin_cmd!("bantay")
        .env("BANTAY_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url = \"http://localhost:8000\""));

    // a second init leaves the existing file alone
    fs::write(&config_path, "base_url = \"http://edited\"\n").unwrap();
    cargo_bin_cmd!("bantay")
        .env("BANTAY_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        "base_url = \"http://edited\"\n"
    );
}

#[test]
fn test_base_url_flag_beats_env_beats_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("base_url = \"{UNREACHABLE}/from-config\"\n"),
    )
    .unwrap();
    let env_url = format!("{UNREACHABLE}/from-env");
    let flag_url = format!("{UNREACHABLE}/from-flag");

    let stdout = login_target(dir.path(), None, None);
    assert!(stdout.contains("/from-config/"), "{stdout}");

    let stdout = login_target(dir.path(), Some(&env_url), None);
    assert!(stdout.contains("/from-env/"), "{stdout}");

    let stdout = login_target(dir.path(), Some(&env_url), Some(&flag_url));
    assert!(stdout.contains("/from-flag/"), "{stdout}");
}

#[test]
fn test_blank_base_url_override_keeps_config_value() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("base_url = \"{UNREACHABLE}/from-config\"\n"),
    )
    .unwrap();

    let stdout = login_target(dir.path(), Some("  "), None);
    assert!(stdout.contains("/from-config/"), "{stdout}");
}

#[test]
fn test_broken_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "base_url = [").unwrap();

    cargo_bin_cmd!("bantay")
        .env("BANTAY_HOME", dir.path())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}
