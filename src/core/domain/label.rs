//! Named records: categories and aliases.
//!
//! Both are stored as `{ "name": ... }` under a key. A category key is its
//! own push id; an alias key is the key of the item it points at.

use serde::{Deserialize, Serialize};

use crate::core::types::ItemKey;

/// Stored form of a category or alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
}

impl NameRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: String,
    pub name: String,
}

/// A named pointer to a stash item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    /// Key of the aliased item.
    pub key: ItemKey,
    pub name: String,
}
