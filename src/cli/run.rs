//! Alias run command.
//!
//! Resolves an alias, substitutes arguments into `${...}` placeholders and
//! hands the line to the platform shell. A bare `http(s)://` link is opened
//! with the system handler instead.

use std::process::Command;

use tracing::info;

use crate::cli::output;
use crate::core::template;
use crate::core::vault::Vault;
use crate::error::Result;

/// Run an aliased item, exiting with the command's status.
pub fn execute(name: &str, args: &[String], dry_run: bool) -> Result<()> {
    let vault = Vault::open()?;
    let resolved = vault.resolve(name, args)?;

    let unfilled = template::placeholders(&resolved.command);
    if !unfilled.is_empty() {
        let names: Vec<String> = unfilled.iter().map(|p| format!("${{{}}}", p)).collect();
        output::warn(&format!("unfilled placeholders: {}", names.join(" ")));
    }

    if dry_run {
        output::data(&resolved.command);
        return Ok(());
    }

    info!(alias = name, key = %resolved.item.key, "running alias");
    let code = open_or_run(&resolved.command)?;
    std::process::exit(code);
}

/// Whether `line` is a single web link.
pub fn is_url(line: &str) -> bool {
    let line = line.trim();
    (line.starts_with("https://") || line.starts_with("http://"))
        && !line.contains(char::is_whitespace)
}

/// Open a link in the default handler, or run anything else in the shell.
pub fn open_or_run(line: &str) -> Result<i32> {
    if is_url(line) {
        info!(url = line.trim(), "opening link");
        open::that(line.trim())?;
        return Ok(0);
    }
    run_line(line)
}

/// Run one command line through the shell. Returns its exit status, or 1
/// when it was killed by a signal.
pub fn run_line(line: &str) -> Result<i32> {
    let status = shell(line).status()?;
    Ok(status.code().unwrap_or(1))
}

#[cfg(unix)]
fn shell(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}

#[cfg(windows)]
fn shell(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(line);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_detection() {
        assert!(is_url("https://example.com/runbook"));
        assert!(is_url("  http://127.0.0.1:9000/status \n"));
        assert!(!is_url("curl https://example.com"));
        assert!(!is_url("https://example.com | sh"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("ls -la"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_passed_through() {
        assert_eq!(run_line("true").unwrap(), 0);
        assert_eq!(run_line("exit 3").unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_line_goes_through_shell() {
        assert_eq!(run_line("test \"$(echo a b)\" = \"a b\"").unwrap(), 0);
    }
}
