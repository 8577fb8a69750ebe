//! Tests for input validation that happens before any network call.

use crate::support::*;

#[test]
fn test_edit_without_changes() {
    let t = Test::new();
    let output = t.run(&["edit", "-abc"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "nothing to change");
}

#[test]
fn test_stash_with_empty_stdin() {
    let t = Test::new();
    let output = t.run(&["stash"]);
    assert_success(&output);
    assert_stdout_contains(&output, "nothing stashed");
}

#[test]
fn test_login_cancelled_without_password() {
    let t = Test::new();
    let output = t.run(&["login", "a@example.com"]);
    assert_success(&output);
    assert_stdout_contains(&output, "cancelled");
    assert!(!t.state_dir().join("session.json").exists());
}

#[test]
fn test_register_password_mismatch() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["register", "a@example.com"])
        .write_stdin("Str0ng!pass\nOther!pass9\n")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "passwords do not match");
}

#[test]
fn test_list_json_and_interactive_conflict() {
    let t = Test::new();
    assert_failure(&t.run(&["list", "--json", "--interactive"]));
}
