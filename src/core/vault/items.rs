//! Item operations.

use tracing::{debug, warn};

use super::Vault;
use crate::core::domain::{Item, ItemPatch};
use crate::core::stash::Entry;
use crate::core::types::ItemKey;
use crate::error::Result;

impl Vault {
    /// Encrypt and store new text.
    pub fn push(&self, text: &str, category: Option<&str>, note: Option<&str>) -> Result<ItemKey> {
        self.stash().append(text, category, note)
    }

    /// Import pending shares, then list the stash oldest first. A failed
    /// import is logged and the stash is listed anyway.
    pub fn list(&self, category: Option<&str>) -> Result<Vec<Entry>> {
        match self.import_pending() {
            Ok(report) => debug!(
                imported = report.imported.len(),
                skipped = report.skipped.len(),
                "inbox drained before listing"
            ),
            Err(e) => warn!(error = %e, "inbox import failed, listing stash only"),
        }
        self.stash().list(category)
    }

    pub fn item(&self, key: &str) -> Result<Item> {
        self.stash().get(key)
    }

    /// Newest item, `None` on an empty stash.
    pub fn latest(&self) -> Result<Option<Item>> {
        self.stash().latest()
    }

    pub fn edit(&self, key: &str, patch: &ItemPatch) -> Result<()> {
        self.stash().update(key, patch)
    }

    /// Delete an item and any alias pointing at it.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.stash().remove(key)?;
        self.aliases().unbind(key)?;
        Ok(())
    }
}
