//! Tests for `pnut server`.

use crate::support::*;

const SERVER: &str = r#"{
  "apiKey": "AIzaTestKey",
  "authDomain": "pnut-test.firebaseapp.com",
  "databaseURL": "https://pnut-test-default-rtdb.firebaseio.com",
  "projectId": "pnut-test"
}"#;

#[test]
fn test_show_defaults() {
    let t = Test::new();
    let output = t.run(&["server"]);
    assert_success(&output);
    assert_stdout_contains(&output, "127.0.0.1:9000");
}

#[test]
fn test_set_and_reset() {
    let t = Test::new();
    let file = t.write_file("firebase.json", SERVER);

    let output = t.run(&["server", file.to_str().unwrap()]);
    assert_success(&output);
    assert!(t.state_dir().join("server.json").exists());

    let output = t.run(&["server"]);
    assert_stdout_contains(&output, "pnut-test-default-rtdb.firebaseio.com");

    assert_success(&t.run(&["server", "default"]));
    assert!(!t.state_dir().join("server.json").exists());
    assert_stdout_contains(&t.run(&["server"]), "127.0.0.1:9000");
}

#[test]
fn test_rejects_invalid_record() {
    let t = Test::new();
    let file = t.write_file(
        "bad.json",
        r#"{ "apiKey": "k", "databaseURL": "ftp://example.com" }"#,
    );
    let output = t.run(&["server", file.to_str().unwrap()]);
    assert_failure(&output);
    assert_stderr_contains(&output, "databaseURL");
    assert!(!t.state_dir().join("server.json").exists());
}

#[test]
fn test_rejects_missing_file() {
    let t = Test::new();
    let output = t.run(&["server", "does-not-exist.json"]);
    assert_failure(&output);
}
