//! Point-to-point sharing.
//!
//! Sending re-encrypts an item for the recipient's published public key and
//! appends it to their inbox (`users/<them>/public/pending-text`). The
//! recipient later drains the inbox into their own stash.
//!
//! Import is sequential and gives every entry a fresh stash key that sorts
//! after everything already stashed. The key is first saved on the inbox
//! entry as `importKey`, then the stash record is written, then the entry
//! is deleted. A retry after a crash finds the copy under the saved key and
//! only finishes the delete, so nothing is lost or duplicated.
//!
//! The inbox is writable by other users. Entries that do not parse are
//! reported and left in place; they never block the rest of the inbox.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::core::cipher::{self, parse_recipient};
use crate::core::constants::IMPORTED_CATEGORY;
use crate::core::contacts::Contacts;
use crate::core::domain::{Identity, PendingShare, StashRecord, Undecryptable};
use crate::core::identity::lookup_public_key;
use crate::core::stash::Stash;
use crate::core::store::paths::{check_key, UserTree};
use crate::core::store::{self, DocumentStore, PushIdGenerator};
use crate::core::types::ItemKey;
use crate::core::validation::{validate_email, validate_length, validate_not_empty};
use crate::error::{Error, Result};

/// One inbox entry, or why it could not be read.
pub type PendingEntry = std::result::Result<(ItemKey, PendingShare), Undecryptable>;

/// Outcome of draining the inbox.
#[derive(Debug, Default)]
pub struct Import {
    /// Stash keys of the imported items, oldest first.
    pub imported: Vec<ItemKey>,
    /// Inbox entries left in place because they could not be read.
    pub skipped: Vec<Undecryptable>,
}

pub struct Sharing<'a> {
    store: &'a dyn DocumentStore,
    identity: &'a Identity,
    max_len: usize,
}

impl<'a> Sharing<'a> {
    pub fn new(store: &'a dyn DocumentStore, identity: &'a Identity, max_len: usize) -> Self {
        Self {
            store,
            identity,
            max_len,
        }
    }

    /// Send text (and an optional note) to another user's inbox.
    ///
    /// # Errors
    ///
    /// `Error::RecipientNotFound` if the recipient is not in the sender's
    /// contacts or has no published key. Nothing is written in that case.
    pub fn share(&self, text: &str, note: Option<&str>, recipient: &str) -> Result<ItemKey> {
        let recipient = recipient.trim();
        validate_email(recipient)?;
        validate_not_empty("text", text)?;
        validate_length("text", text, self.max_len)?;
        let note = note.filter(|n| !n.is_empty());
        if let Some(note) = note {
            validate_length("note", note, self.max_len)?;
        }

        let contacts = Contacts::new(self.store, self.identity.email());
        if !contacts.contains(recipient)? {
            debug!(recipient, "recipient is not a contact");
            return Err(Error::RecipientNotFound(recipient.to_string()));
        }
        let public_key = lookup_public_key(self.store, recipient)?
            .ok_or_else(|| Error::RecipientNotFound(recipient.to_string()))?;
        let key = parse_recipient(&public_key)?;

        let share = PendingShare {
            data: cipher::encrypt(text, &key)?,
            note: note.map(|n| cipher::encrypt(n, &key)).transpose()?,
            timestamp: chrono::Utc::now().timestamp_millis(),
            email: self.identity.email().to_string(),
            user_id: self.identity.user_id().to_string(),
            import_key: None,
        };

        let path = UserTree::new(recipient).pending();
        let id = self.store.append(&path, &store::to_value(&path, &share)?)?;
        info!(recipient, key = %id, "item shared");
        Ok(id)
    }

    /// Entries waiting in the signed-in user's inbox, in key order. An entry
    /// that does not parse becomes an `Err` and the rest are still returned.
    pub fn pending(&self) -> Result<Vec<PendingEntry>> {
        let tree = UserTree::new(self.identity.email());
        Ok(store::children(self.store, &tree.pending())?
            .into_iter()
            .map(|(key, value)| match serde_json::from_value(value) {
                Ok(share) => Ok((key, share)),
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping malformed inbox entry");
                    Err(Undecryptable {
                        error: store::malformed(&tree.pending_entry(&key), e),
                        key,
                    })
                }
            })
            .collect())
    }

    pub fn pending_count(&self) -> Result<usize> {
        let tree = UserTree::new(self.identity.email());
        Ok(store::children(self.store, &tree.pending())?.len())
    }

    /// Move every readable inbox entry into the stash.
    ///
    /// A store failure stops the batch; entries already moved stay moved
    /// and the rest stay in the inbox.
    pub fn import_pending(&self, stash: &Stash<'_>) -> Result<Import> {
        let tree = UserTree::new(self.identity.email());
        let mut report = Import::default();
        let pending = self.pending()?;
        if pending.is_empty() {
            return Ok(report);
        }
        let mut ids = match stash.last_key()? {
            Some(last) => PushIdGenerator::after(&last),
            None => PushIdGenerator::new(),
        };

        for entry in pending {
            let (key, share) = match entry {
                Ok(entry) => entry,
                Err(bad) => {
                    report.skipped.push(bad);
                    continue;
                }
            };
            let entry_path = tree.pending_entry(&key);

            if let Some(done) = self.finished_copy(stash, &share)? {
                self.store.remove(&entry_path)?;
                debug!(key = %key, stash_key = %done, "finished interrupted import");
                report.imported.push(done);
                continue;
            }

            let target = ids.next_id();

            let mut reserve = Map::new();
            reserve.insert("importKey".into(), Value::String(target.clone()));
            self.store.update(&entry_path, &reserve)?;

            let record = StashRecord {
                data: share.data,
                note: share.note,
                timestamp: chrono::Utc::now().timestamp_millis(),
                user_email: self.identity.email().to_string(),
                user_id: self.identity.user_id().to_string(),
                category: IMPORTED_CATEGORY.to_string(),
                origin_email: Some(share.email),
                origin_id: Some(share.user_id),
            };
            stash.put(&target, &record)?;
            self.store.remove(&entry_path)?;
            debug!(key = %key, stash_key = %target, from = ?record.origin_email, "share imported");
            report.imported.push(target);
        }

        if !report.imported.is_empty() {
            info!(count = report.imported.len(), "inbox imported");
        }
        if !report.skipped.is_empty() {
            warn!(count = report.skipped.len(), "inbox entries skipped");
        }
        Ok(report)
    }

    /// Stash key of a copy made by an earlier, interrupted import of `share`.
    ///
    /// The saved key comes from a writable inbox, so it only counts when the
    /// stash really holds this share's ciphertext from this sender there.
    fn finished_copy(&self, stash: &Stash<'_>, share: &PendingShare) -> Result<Option<ItemKey>> {
        let Some(saved) = share.import_key.as_deref() else {
            return Ok(None);
        };
        if check_key(saved).is_err() {
            return Ok(None);
        }
        Ok(stash.find_record(saved)?.and_then(|record| {
            let same = record.data == share.data
                && record.origin_email.as_deref() == Some(share.email.as_str());
            same.then(|| saved.to_string())
        }))
    }
}
