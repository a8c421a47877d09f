use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("bantay")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("route"));
}

#[test]
fn test_login_help_shows_flags() {
    cargo_bin_cmd!("bantay")
        .args(["login", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--password-stdin"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_route_shows_mapped_views() {
    for (path, title) in [
        ("/", "Bantay"),
        ("/admin", "Admin Dashboard"),
        ("/coast-guard", "Coast Guard View"),
        ("/fisherfolk", "Fisherfolk View"),
    ] {
        cargo_bin_cmd!("bantay")
            .args(["route", path])
            .assert()
            .success()
            .stdout(predicate::str::contains(title));
    }
}

#[test]
fn test_route_unknown_path_fails() {
    cargo_bin_cmd!("bantay")
        .args(["route", "/settings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown route '/settings'"));
}
