//! Sharing and contact operations.

use super::Vault;
use crate::core::sharing::{Import, PendingEntry};
use crate::core::types::{Email, ItemKey};
use crate::error::Result;

impl Vault {
    /// Send one of the user's items to a contact.
    pub fn share(&self, key: &str, recipient: &str) -> Result<ItemKey> {
        let item = self.item(key)?;
        self.sharing()
            .share(&item.text, item.note.as_deref(), recipient)
    }

    /// Move inbox entries into the stash.
    pub fn import_pending(&self) -> Result<Import> {
        self.sharing().import_pending(&self.stash())
    }

    pub fn pending(&self) -> Result<Vec<PendingEntry>> {
        self.sharing().pending()
    }

    pub fn pending_count(&self) -> Result<usize> {
        self.sharing().pending_count()
    }

    pub fn add_user(&self, email: &str) -> Result<()> {
        self.contacts().add(email)
    }

    pub fn remove_user(&self, email: &str) -> Result<bool> {
        self.contacts().remove(email)
    }

    pub fn users(&self) -> Result<Vec<Email>> {
        self.contacts().list()
    }
}
