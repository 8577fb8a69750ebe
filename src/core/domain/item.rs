//! Stash item types.
//!
//! [`StashRecord`] is what the store holds: ciphertext plus clear metadata.
//! [`Item`] is the decrypted view handed to callers.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_CATEGORY;
use crate::core::types::{Email, EncryptedValue, ItemKey, Timestamp, UserId};
use crate::error::Error;

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Stored form of an item at `private/peanut-stash/<key>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashRecord {
    pub data: EncryptedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<EncryptedValue>,
    #[serde(default)]
    pub timestamp: Timestamp,
    pub user_email: Email,
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default = "default_category")]
    pub category: String,
    /// Sender of an imported share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<UserId>,
}

/// A decrypted item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub key: ItemKey,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub category: String,
    pub timestamp: Timestamp,
    pub owner: Email,
    /// Who wrote the text: the sender for imported items, else the owner.
    pub origin: Email,
}

impl Item {
    pub fn from_record(key: &str, record: StashRecord, text: String, note: Option<String>) -> Self {
        let origin = record
            .origin_email
            .clone()
            .unwrap_or_else(|| record.user_email.clone());
        Self {
            key: key.to_string(),
            text,
            note,
            category: record.category,
            timestamp: record.timestamp,
            owner: record.user_email,
            origin,
        }
    }

    /// Whether the item arrived through a share.
    pub fn is_shared(&self) -> bool {
        self.origin != self.owner
    }

    /// Local time of creation, if the timestamp is valid.
    pub fn created(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    /// First line, truncated to `width` characters, for menus.
    pub fn preview(&self, width: usize) -> String {
        let line = self.text.lines().next().unwrap_or_default();
        let mut preview: String = line.chars().take(width).collect();
        if line.chars().count() > width || self.text.lines().nth(1).is_some() {
            preview.push('…');
        }
        preview
    }
}

/// An item that could not be decrypted. Listings keep going past it.
#[derive(Debug)]
pub struct Undecryptable {
    pub key: ItemKey,
    pub error: Error,
}

/// Partial update of an item. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub text: Option<String>,
    /// `Some("")` removes the note.
    pub note: Option<String>,
    pub category: Option<String>,
}

impl ItemPatch {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.note.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_reads_legacy_shape() {
        // Written before notes and origin fields existed.
        let record: StashRecord = serde_json::from_value(json!({
            "data": "-----BEGIN AGE ENCRYPTED FILE-----",
            "timestamp": 1700000000000i64,
            "userEmail": "a@example.com",
            "userId": "uid-a"
        }))
        .unwrap();
        assert_eq!(record.category, "default");
        assert!(record.note.is_none());
        assert!(record.origin_email.is_none());
    }

    #[test]
    fn test_record_wire_names() {
        let record = StashRecord {
            data: "x".into(),
            note: None,
            timestamp: 1,
            user_email: "a@example.com".into(),
            user_id: "uid".into(),
            category: "infra".into(),
            origin_email: Some("b@example.com".into()),
            origin_id: Some("uid-b".into()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userEmail"], "a@example.com");
        assert_eq!(json["originEmail"], "b@example.com");
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_origin_defaults_to_owner() {
        let record: StashRecord = serde_json::from_value(json!({
            "data": "x", "userEmail": "a@example.com"
        }))
        .unwrap();
        let item = Item::from_record("k", record, "echo hi".into(), None);
        assert_eq!(item.origin, "a@example.com");
        assert!(!item.is_shared());
    }

    #[test]
    fn test_preview() {
        let record: StashRecord =
            serde_json::from_value(json!({ "data": "x", "userEmail": "a@b.c" })).unwrap();
        let item = Item::from_record("k", record, "first line\nsecond".into(), None);
        assert_eq!(item.preview(40), "first line…");
        assert_eq!(item.preview(5), "first…");
    }

    #[test]
    fn test_patch_builder() {
        assert!(ItemPatch::default().is_empty());
        let patch = ItemPatch::default().category("infra").note("");
        assert_eq!(patch.category.as_deref(), Some("infra"));
        assert_eq!(patch.note.as_deref(), Some(""));
        assert!(patch.text.is_none());
    }
}
