//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR, and is dropped when not a terminal):
//! - Green: success, commands
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: keys, emails, hints
//! - Bold: headers, important values
//! - Dim: secondary info

use console::{style, StyledObject};
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D>(value: D) -> StyledObject<D> {
    let styled = style(value);
    if colors_enabled() {
        styled
    } else {
        styled.force_styling(false)
    }
}

/// `✓ stashed`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓").green(), msg);
}

/// `✗ not logged in`, on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗").for_stderr().red(), msg);
}

/// `⚠ alias already in use`, on stderr.
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠").for_stderr().yellow(), msg);
}

/// `→ run: pnut login <email>`, on stderr.
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        paint("→").for_stderr().cyan(),
        paint(msg).for_stderr().cyan()
    );
}

pub fn header(title: &str) {
    println!("{}", paint(title).bold());
}

/// `  email  alice@example.com`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", paint(label).dim(), paint(value.to_string()).bold());
}

/// `  • bob@example.com`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

pub fn rule() {
    println!("{}", paint("─".repeat(RULE_WIDTH)).dim());
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

pub fn dimmed(msg: &str) {
    println!("{}", paint(msg).dim());
}

/// Raw data for piping: no decoration at all.
pub fn data(msg: &str) {
    println!("{}", msg);
}

/// A command line, inline.
pub fn cmd(c: &str) -> String {
    paint(c).green().to_string()
}

/// An item key, inline.
pub fn key(k: &str) -> String {
    paint(k).cyan().to_string()
}

/// An email or category, inline.
pub fn label(l: &str) -> String {
    paint(l).cyan().to_string()
}

/// `#category`, dimmed, or nothing for the default category.
pub fn category_tag(category: &str) -> String {
    if category == crate::core::constants::DEFAULT_CATEGORY {
        String::new()
    } else {
        paint(format!("#{}", category)).dim().to_string()
    }
}

/// Pretty JSON on stdout.
pub fn json<T: serde::Serialize>(value: &T) -> crate::error::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", text);
    Ok(())
}
