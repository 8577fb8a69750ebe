//! Tests for error reporting and top-level flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();
    let output = t.run(&["--help"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
    assert_stdout_contains(&output, "stash");
}

#[test]
fn test_version() {
    let t = Test::new();
    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "pnut");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    assert_failure(&t.run(&["unknown-command"]));
}

#[test]
fn test_completions() {
    let t = Test::new();
    for shell in ["bash", "zsh", "fish", "power-shell"] {
        let output = t.run(&["completions", shell]);
        assert_success(&output);
        assert_stdout_contains(&output, "pnut");
    }
}

#[test]
fn test_commands_need_login() {
    let t = Test::new();
    for args in [
        vec!["list"],
        vec!["pop"],
        vec!["show", "-abc"],
        vec!["rm", "-abc"],
        vec!["inbox"],
        vec!["whoami"],
        vec!["users", "list"],
        vec!["categories"],
        vec!["alias", "run", "deploy", "x"],
        vec!["stash", "echo", "hi"],
    ] {
        let output = t.run(&args);
        assert_failure(&output);
        assert_stderr_contains(&output, "not logged in");
        assert_stderr_contains(&output, "pnut login");
    }
}

#[test]
fn test_corrupt_session_reported() {
    let t = Test::new();
    std::fs::create_dir_all(t.state_dir()).unwrap();
    std::fs::write(t.state_dir().join("session.json"), "{ not json").unwrap();

    let output = t.run(&["list"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "session cache is corrupt");
    assert_stderr_contains(&output, "pnut login");
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();
    let output = t.run(&["logout", "--verbose"]);
    assert_success(&output);
}

#[test]
fn test_share_needs_login() {
    use predicates::prelude::*;

    let t = Test::new();
    t.cmd()
        .args(["share", "-NxYz12AbCdEfGhIjK", "bob@example.com"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_pop_copy_needs_login() {
    let t = Test::new();
    let out = t.run(&["pop", "--copy"]);
    assert_failure(&out);
    assert_stderr_contains(&out, "not logged in");
}
