//! Category and alias operations.

use tracing::warn;

use super::Vault;
use crate::core::alias::Resolved;
use crate::core::domain::{Alias, Category};
use crate::error::Result;

impl Vault {
    pub fn add_category(&self, name: &str) -> Result<String> {
        self.categories().add(name)
    }

    /// Label with exactly this name, first in key order.
    pub fn find_category(&self, name: &str) -> Result<Option<Category>> {
        self.categories().find(name.trim())
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.categories().list()
    }

    pub fn remove_category(&self, key: &str) -> Result<()> {
        self.categories().remove(key)
    }

    /// Name an item. Returns the other alias that already used this name,
    /// which keeps winning lookups if its key is lower.
    pub fn bind_alias(&self, key: &str, name: &str) -> Result<Option<Alias>> {
        let aliases = self.aliases();
        let existing = aliases.find(name)?.filter(|a| a.key != key);
        if let Some(other) = &existing {
            warn!(name, other = %other.key, "alias name already in use");
        }
        aliases.bind(&self.stash(), key, name)?;
        Ok(existing)
    }

    pub fn unbind_alias(&self, key: &str) -> Result<bool> {
        self.aliases().unbind(key)
    }

    pub fn list_aliases(&self) -> Result<Vec<Alias>> {
        self.aliases().list()
    }

    /// Resolve an alias into a command line.
    pub fn resolve<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<Resolved> {
        self.aliases().resolve(&self.stash(), name, args)
    }
}
