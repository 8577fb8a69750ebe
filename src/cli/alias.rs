//! Alias commands: add, rm, list. `alias run` lives in [`crate::cli::run`].

use tracing::info;

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

pub fn add(key: &str, name: &str) -> Result<()> {
    info!(key, name, "binding alias");
    let vault = Vault::open()?;
    if let Some(existing) = vault.bind_alias(key, name)? {
        output::warn(&format!(
            "{} already names {}; lookups return the oldest item",
            output::cmd(name),
            output::key(&existing.key)
        ));
    }
    output::success(&format!("{} → {}", output::cmd(name), output::key(key)));
    Ok(())
}

pub fn rm(key: &str) -> Result<()> {
    let vault = Vault::open()?;
    if vault.unbind_alias(key)? {
        output::success(&format!("removed alias of {}", output::key(key)));
    } else {
        output::dimmed(&format!("{} has no alias", key));
    }
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let vault = Vault::open()?;
    let aliases = vault.list_aliases()?;

    if json {
        return output::json(&aliases);
    }
    if aliases.is_empty() {
        output::dimmed("no aliases");
        return Ok(());
    }
    for alias in &aliases {
        output::data(&format!("{}  {}", output::cmd(&alias.name), output::key(&alias.key)));
    }
    Ok(())
}
