use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn prints_version() {
    Command::cargo_bin("vidstream")
        .expect("binary built")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn prints_help() {
    Command::cargo_bin("vidstream")
        .expect("binary built")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("VidStream"))
        .stdout(contains("--version"));
}
