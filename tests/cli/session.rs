//! Tests for the local session cache as seen by the binary.

use crate::support::*;

#[test]
fn test_logout_without_session() {
    let t = Test::new();
    let output = t.run(&["logout"]);
    assert_success(&output);
    assert_stdout_contains(&output, "not logged in");
}

#[test]
fn test_logout_clears_session() {
    let t = Test::new();
    std::fs::create_dir_all(t.state_dir()).unwrap();
    let session = t.session();
    session.store("a@example.com", "Str0ng!pass").unwrap();
    assert!(session.exists());

    let output = t.run(&["logout"]);
    assert_success(&output);
    assert_stdout_contains(&output, "logged out");
    assert!(!session.exists());
}

#[test]
fn test_session_file_is_not_plaintext() {
    let t = Test::new();
    std::fs::create_dir_all(t.state_dir()).unwrap();
    t.session().store("a@example.com", "Str0ng!pass").unwrap();

    let raw = std::fs::read_to_string(t.state_dir().join("session.json")).unwrap();
    assert!(!raw.contains("a@example.com"));
    assert!(!raw.contains("Str0ng!pass"));
}

#[test]
fn test_session_bound_to_machine() {
    let t = Test::new();
    std::fs::create_dir_all(t.state_dir()).unwrap();
    t.session().store("a@example.com", "Str0ng!pass").unwrap();

    let output = t
        .cmd()
        .env("PNUT_MACHINE_ID", "some-other-machine")
        .arg("list")
        .write_stdin("")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "session cache is corrupt");
}
