//! Stash commands: stash, list, pop, show, edit, rm.

use std::io::IsTerminal;

use tracing::info;

use crate::cli::prompt::{self, Prompt};
use crate::cli::{browse, clipboard, output};
use crate::core::domain::{Item, ItemPatch};
use crate::core::vault::Vault;
use crate::error::{Result, ValidationError};

const PREVIEW_WIDTH: usize = 72;

/// Stash new text. With no words given, the text is prompted for (or read
/// from stdin when piped).
pub fn stash(words: &[String], category: Option<&str>, note: Option<&str>) -> Result<()> {
    let text = if words.is_empty() {
        match prompt::text("text")? {
            Prompt::Value(text) => text,
            Prompt::Empty | Prompt::Cancelled => {
                output::dimmed("nothing stashed");
                return Ok(());
            }
        }
    } else {
        words.join(" ")
    };

    info!(category = ?category, "stashing item");
    let vault = Vault::open()?;
    let key = vault.push(&text, category, note)?;
    output::success(&format!("stashed {}", output::key(&key)));
    Ok(())
}

/// List the stash, newest first. Imports pending shares first.
pub fn list(category: Option<&str>, json: bool, interactive: bool) -> Result<()> {
    let vault = Vault::open()?;
    if interactive && std::io::stdin().is_terminal() {
        return browse::execute(&vault);
    }

    let mut items = Vec::new();
    let mut broken = Vec::new();
    for entry in vault.list(category)? {
        match entry {
            Ok(item) => items.push(item),
            Err(bad) => broken.push(bad),
        }
    }
    items.reverse();

    if json {
        let keys: Vec<&str> = broken.iter().map(|b| b.key.as_str()).collect();
        let result = serde_json::json!({
            "items": items,
            "count": items.len(),
            "undecryptable": keys,
        });
        output::json(&result)?;
        return Ok(());
    }

    for bad in &broken {
        output::warn(&format!("could not read {}: {}", bad.key, bad.error));
    }
    if items.is_empty() {
        output::dimmed("stash is empty");
        return Ok(());
    }

    for item in &items {
        let mut line = format!(
            "{}  {}",
            output::key(&item.key),
            item.preview(PREVIEW_WIDTH)
        );
        let tag = output::category_tag(&item.category);
        if !tag.is_empty() {
            line.push(' ');
            line.push_str(&tag);
        }
        if item.is_shared() {
            line.push_str(&format!(" (from {})", output::label(&item.origin)));
        }
        output::data(&line);
    }
    Ok(())
}

/// Print the newest item's text, undecorated, for piping.
/// Newest item, printed bare for piping or copied to the clipboard.
pub fn pop(copy: bool) -> Result<()> {
    let vault = Vault::open()?;
    match vault.latest()? {
        Some(item) if copy => {
            clipboard::copy(&item.text)?;
            output::success(&format!("copied {} to the clipboard", output::key(&item.key)));
        }
        Some(item) => output::data(&item.text),
        None => output::dimmed("stash is empty"),
    }
    Ok(())
}

pub fn show(key: &str) -> Result<()> {
    let vault = Vault::open()?;
    let item = vault.item(key)?;
    print_item(&item);
    Ok(())
}

/// Full view of one item.
pub fn print_item(item: &Item) {
    output::section(&item.key);
    output::data(&item.text);
    output::rule();
    if let Some(note) = &item.note {
        output::kv("note", note);
    }
    output::kv("category", &item.category);
    if let Some(created) = item.created() {
        output::kv("created", created.format("%Y-%m-%d %H:%M"));
    }
    if item.is_shared() {
        output::kv("from", &item.origin);
    }
}

/// Change text, note or category. An empty `--note ""` removes the note.
pub fn edit(
    key: &str,
    text: Option<String>,
    note: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let patch = ItemPatch {
        text,
        note,
        category,
    };
    if patch.is_empty() {
        return Err(ValidationError::NothingToChange("pass --text, --note or --category").into());
    }

    info!(key, "editing item");
    let vault = Vault::open()?;
    vault.edit(key, &patch)?;
    output::success(&format!("updated {}", output::key(key)));
    Ok(())
}

pub fn rm(key: &str) -> Result<()> {
    info!(key, "removing item");
    let vault = Vault::open()?;
    vault.remove(key)?;
    output::success(&format!("removed {}", output::key(key)));
    Ok(())
}
