//! Test support utilities for pnut integration tests.
//!
//! Provides an isolated state directory for the binary and an in-memory
//! backend for library-level workflows.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

use pnut::core::machine;
use pnut::core::session::SessionCache;

/// Machine id the binary sees in every test.
pub const MACHINE_ID: &str = "pnut-test-machine";

/// Test environment with its own state directory and home.
///
/// Nothing process-global is touched: the child process gets its paths
/// through environment variables, so tests run in parallel.
pub struct Test {
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("failed to create temp home"),
        }
    }

    /// The `PNUT_HOME` directory.
    pub fn state_dir(&self) -> PathBuf {
        self.home.path().join(".pnut")
    }

    /// A pnut command confined to this environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("pnut").expect("failed to find pnut binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("PNUT_HOME", self.state_dir());
        cmd.env("PNUT_MACHINE_ID", MACHINE_ID);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("PNUT_LOG");
        cmd.current_dir(self.home.path());
        cmd
    }

    /// Run with arguments and empty stdin.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .write_stdin("")
            .output()
            .expect("failed to run pnut")
    }

    /// Session cache the binary would use.
    pub fn session(&self) -> SessionCache {
        SessionCache::new(
            self.state_dir().join("session.json"),
            machine::session_key_from(MACHINE_ID),
        )
    }

    /// Write a file under the home directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }
}
