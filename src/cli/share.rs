//! Sharing commands: share, inbox.

use tracing::info;

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

/// Send one of your items to another user's inbox.
pub fn share(key: &str, recipient: &str) -> Result<()> {
    info!(key, recipient, "sharing item");
    let vault = Vault::open()?;
    vault.share(key, recipient)?;
    output::success(&format!(
        "shared {} with {}",
        output::key(key),
        output::label(recipient)
    ));
    Ok(())
}

/// Move everything waiting in the inbox into the stash.
pub fn inbox() -> Result<()> {
    let vault = Vault::open()?;
    let pending = vault.pending()?;
    if pending.is_empty() {
        output::dimmed("inbox is empty");
        return Ok(());
    }

    for entry in &pending {
        match entry {
            Ok((_, share)) => output::list_item(&format!("from {}", output::label(&share.email))),
            Err(bad) => output::warn(&format!("unreadable entry {}", output::key(&bad.key))),
        }
    }
    let report = vault.import_pending()?;
    output::success(&format!(
        "imported {} item{} into #imported",
        report.imported.len(),
        if report.imported.len() == 1 { "" } else { "s" }
    ));
    if !report.skipped.is_empty() {
        output::hint(&format!(
            "{} unreadable entr{} left in the inbox",
            report.skipped.len(),
            if report.skipped.len() == 1 { "y" } else { "ies" }
        ));
    }
    Ok(())
}
