//! Category commands.
//!
//! Categories are labels for picking; deleting one leaves items alone.

use tracing::info;

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

pub fn add(name: &str) -> Result<()> {
    info!(name, "adding category");
    let vault = Vault::open()?;
    if let Some(existing) = vault.find_category(name)? {
        output::warn(&format!(
            "{} already exists ({})",
            output::label(&existing.name),
            output::key(&existing.key)
        ));
        return Ok(());
    }
    let key = vault.add_category(name)?;
    output::success(&format!("added {} ({})", output::label(name.trim()), output::key(&key)));
    Ok(())
}

pub fn rm(key: &str) -> Result<()> {
    info!(key, "removing category");
    let vault = Vault::open()?;
    vault.remove_category(key)?;
    output::success(&format!("removed category {}", output::key(key)));
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let vault = Vault::open()?;
    let categories = vault.list_categories()?;

    if json {
        return output::json(&categories);
    }
    if categories.is_empty() {
        output::dimmed("no categories");
        return Ok(());
    }
    for category in &categories {
        output::data(&format!("{}  {}", output::key(&category.key), category.name));
    }
    Ok(())
}
