//! Integration tests for the binary surface

use assert_cmd::Command;
use predicates::prelude::*;

fn pokepedai() -> Command {
    let mut cmd = Command::cargo_bin("pokepedai").expect("binary should build");
    // Ignore any POKEPEDAI_* overrides from the outer environment
    cmd.env_remove("POKEPEDAI_BASE_URL");
    cmd.env_remove("POKEPEDAI_TIMEOUT_SECONDS");
    cmd.env_remove("POKEPEDAI_SESSIONS_FILE");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    pokepedai()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("sessions"));
}

#[test]
fn test_version_flag() {
    pokepedai()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pokepedai"));
}

#[test]
fn test_sessions_list_creates_and_shows_fresh_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let sessions_file = dir.path().join("sessions.json");

    pokepedai()
        .args(["--sessions-file", sessions_file.to_str().unwrap()])
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New chat"));

    // Initialization persisted the fresh session
    assert!(sessions_file.exists());
}

#[test]
fn test_sessions_new_prints_created_id() {
    let dir = tempfile::TempDir::new().unwrap();
    let sessions_file = dir.path().join("sessions.json");

    pokepedai()
        .args(["--sessions-file", sessions_file.to_str().unwrap()])
        .args(["sessions", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created session session-"));
}

#[test]
fn test_sessions_delete_unknown_id_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let sessions_file = dir.path().join("sessions.json");

    pokepedai()
        .args(["--sessions-file", sessions_file.to_str().unwrap()])
        .args(["sessions", "delete", "session-does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No session matches"));
}

#[test]
fn test_invalid_base_url_fails_validation() {
    pokepedai()
        .args(["--base-url", "not-a-url"])
        .args(["sessions", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http(s)"));
}
