//! The users a person may share with.
//!
//! Stored as `contacts/<email key> = "true"`. Adding someone is one-sided:
//! it lets the owner look up their public key and send to their inbox, and
//! grants the other user nothing.

use serde_json::Value;
use tracing::info;

use crate::core::store::paths::{email_from_key, UserTree};
use crate::core::store::{self, DocumentStore};
use crate::core::types::Email;
use crate::core::validation::validate_email;
use crate::error::Result;

pub struct Contacts<'a> {
    store: &'a dyn DocumentStore,
    tree: UserTree,
}

impl<'a> Contacts<'a> {
    pub fn new(store: &'a dyn DocumentStore, email: &str) -> Self {
        Self {
            store,
            tree: UserTree::new(email),
        }
    }

    pub fn add(&self, email: &str) -> Result<()> {
        let email = email.trim();
        validate_email(email)?;
        self.store
            .set(&self.tree.contact(email), &Value::String("true".into()))?;
        info!(contact = email, "contact added");
        Ok(())
    }

    /// Returns whether the contact existed.
    pub fn remove(&self, email: &str) -> Result<bool> {
        let email = email.trim();
        validate_email(email)?;
        let path = self.tree.contact(email);
        if self.store.get(&path)?.is_none() {
            return Ok(false);
        }
        self.store.remove(&path)?;
        info!(contact = email, "contact removed");
        Ok(true)
    }

    pub fn contains(&self, email: &str) -> Result<bool> {
        let email = email.trim();
        validate_email(email)?;
        Ok(self.store.get(&self.tree.contact(email))?.is_some())
    }

    /// All contacts, alphabetically.
    pub fn list(&self) -> Result<Vec<Email>> {
        let mut emails: Vec<Email> = store::children(self.store, &self.tree.contacts())?
            .into_iter()
            .map(|(key, _)| email_from_key(&key))
            .collect();
        emails.sort();
        Ok(emails)
    }
}
