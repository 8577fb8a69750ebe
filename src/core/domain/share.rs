//! Pending share type.

use serde::{Deserialize, Serialize};

use crate::core::types::{Email, EncryptedValue, ItemKey, Timestamp, UserId};

/// An item waiting in a recipient's inbox at `public/pending-text/<key>`.
///
/// The payload is already encrypted for the recipient; sender fields are
/// in clear so the recipient can see who sent it before importing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingShare {
    pub data: EncryptedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<EncryptedValue>,
    #[serde(default)]
    pub timestamp: Timestamp,
    /// Sender email.
    pub email: Email,
    /// Sender user id.
    #[serde(default)]
    pub user_id: UserId,
    /// Stash key reserved by the recipient when an import starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_key: Option<ItemKey>,
}
