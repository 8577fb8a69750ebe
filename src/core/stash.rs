//! The encrypted item stash.
//!
//! Items live at `users/<key>/private/peanut-stash/<push id>`. Text and note
//! are encrypted for the owner's own public key; category, timestamp and
//! authorship stay in clear so listings can filter without decrypting.
//!
//! Length limits are checked before the first write, so an oversized item
//! never reaches the store.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::core::constants::DEFAULT_CATEGORY;
use crate::core::domain::{Identity, Item, ItemPatch, StashRecord, Undecryptable};
use crate::core::store::paths::{check_key, UserTree};
use crate::core::store::{self, DocumentStore};
use crate::core::types::ItemKey;
use crate::core::validation::{validate_length, validate_not_empty};
use crate::error::{Error, Result};

/// One entry of a listing: the item, or why it could not be read.
pub type Entry = std::result::Result<Item, Undecryptable>;

/// The signed-in user's stash.
pub struct Stash<'a> {
    store: &'a dyn DocumentStore,
    identity: &'a Identity,
    tree: UserTree,
    max_len: usize,
}

impl<'a> Stash<'a> {
    pub fn new(store: &'a dyn DocumentStore, identity: &'a Identity, max_len: usize) -> Self {
        Self {
            store,
            identity,
            tree: UserTree::new(identity.email()),
            max_len,
        }
    }

    /// Encrypt and store a new item. Returns its key.
    ///
    /// # Errors
    ///
    /// `Error::Capacity` if text or note is longer than the limit, raised
    /// before anything is written.
    pub fn append(&self, text: &str, category: Option<&str>, note: Option<&str>) -> Result<ItemKey> {
        validate_not_empty("text", text)?;
        validate_length("text", text, self.max_len)?;
        let note = note.filter(|n| !n.is_empty());
        if let Some(note) = note {
            validate_length("note", note, self.max_len)?;
        }

        let record = StashRecord {
            data: self.identity.seal(text)?,
            note: note.map(|n| self.identity.seal(n)).transpose()?,
            timestamp: chrono::Utc::now().timestamp_millis(),
            user_email: self.identity.email().to_string(),
            user_id: self.identity.user_id().to_string(),
            category: normalize_category(category),
            origin_email: None,
            origin_id: None,
        };

        let path = self.tree.stash();
        let key = self.store.append(&path, &store::to_value(&path, &record)?)?;
        info!(key = %key, category = %record.category, "item stashed");
        Ok(key)
    }

    /// Every item in ascending key order (oldest first), optionally only one
    /// category. An item that fails to decrypt becomes an `Err` entry and the
    /// listing continues.
    pub fn list(&self, category: Option<&str>) -> Result<Vec<Entry>> {
        let path = self.tree.stash();
        let mut entries = Vec::new();

        for (key, value) in store::children(self.store, &path)? {
            let record: StashRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping malformed item");
                    entries.push(Err(Undecryptable {
                        error: store::malformed(&self.tree.stash_item(&key), e),
                        key,
                    }));
                    continue;
                }
            };
            if category.is_some_and(|c| c != record.category) {
                continue;
            }
            match self.decrypt(&key, record) {
                Ok(item) => entries.push(Ok(item)),
                Err(error) => {
                    warn!(key = %key, error = %error, "item could not be decrypted");
                    entries.push(Err(Undecryptable { key, error }));
                }
            }
        }

        debug!(count = entries.len(), "stash listed");
        Ok(entries)
    }

    /// Fetch and decrypt one item.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if there is no item with this key.
    pub fn get(&self, key: &str) -> Result<Item> {
        let record = self.record(key)?;
        self.decrypt(key, record)
    }

    /// The newest item, `None` on an empty stash.
    pub fn latest(&self) -> Result<Option<Item>> {
        let path = self.tree.stash();
        match store::children(self.store, &path)?.pop() {
            None => Ok(None),
            Some((key, value)) => {
                let record: StashRecord = serde_json::from_value(value)
                    .map_err(|e| store::malformed(&self.tree.stash_item(&key), e))?;
                self.decrypt(&key, record).map(Some)
            }
        }
    }

    /// Apply a partial update. Text and note are re-encrypted.
    pub fn update(&self, key: &str, patch: &ItemPatch) -> Result<()> {
        if let Some(text) = &patch.text {
            validate_not_empty("text", text)?;
            validate_length("text", text, self.max_len)?;
        }
        if let Some(note) = &patch.note {
            validate_length("note", note, self.max_len)?;
        }
        // Existence check: updating a missing key would create a partial record.
        self.record(key)?;

        let mut fields = Map::new();
        if let Some(text) = &patch.text {
            fields.insert("data".into(), Value::String(self.identity.seal(text)?));
        }
        if let Some(note) = &patch.note {
            let value = if note.is_empty() {
                Value::Null
            } else {
                Value::String(self.identity.seal(note)?)
            };
            fields.insert("note".into(), value);
        }
        if let Some(category) = &patch.category {
            fields.insert(
                "category".into(),
                Value::String(normalize_category(Some(category))),
            );
        }
        if fields.is_empty() {
            return Ok(());
        }

        self.store.update(&self.tree.stash_item(key), &fields)?;
        info!(key, "item updated");
        Ok(())
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if there is no item with this key.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.record(key)?;
        self.store.remove(&self.tree.stash_item(key))?;
        info!(key, "item removed");
        Ok(())
    }

    /// Whether an item with this key exists.
    pub fn contains(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.store.get(&self.tree.stash_item(key))?.is_some())
    }

    /// Raw stored record.
    pub(crate) fn record(&self, key: &str) -> Result<StashRecord> {
        check_key(key)?;
        store::read(self.store, &self.tree.stash_item(key))?
            .ok_or_else(|| Error::not_found("item", key))
    }

    /// Highest key in the stash.
    pub(crate) fn last_key(&self) -> Result<Option<ItemKey>> {
        Ok(store::children(self.store, &self.tree.stash())?
            .pop()
            .map(|(key, _)| key))
    }

    /// Raw record at `key`, `None` when there is none or it is unreadable.
    pub(crate) fn find_record(&self, key: &str) -> Result<Option<StashRecord>> {
        check_key(key)?;
        let path = self.tree.stash_item(key);
        Ok(match self.store.get(&path)? {
            None => None,
            Some(value) => serde_json::from_value(value).ok(),
        })
    }

    /// Store a record under an explicit key, replacing whatever is there.
    pub(crate) fn put(&self, key: &str, record: &StashRecord) -> Result<()> {
        check_key(key)?;
        let path = self.tree.stash_item(key);
        self.store.set(&path, &store::to_value(&path, record)?)
    }

    fn decrypt(&self, key: &str, record: StashRecord) -> Result<Item> {
        let text = self.identity.open(&record.data)?.to_string();
        let note = match &record.note {
            Some(note) => Some(self.identity.open(note)?.to_string()),
            None => None,
        };
        Ok(Item::from_record(key, record, text, note))
    }
}

fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}
