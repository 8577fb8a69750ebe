//! Remote keyed-document store.
//!
//! The store is a JSON tree addressed by `/`-separated paths. It is an
//! external collaborator: the crate only declares what it needs from one and
//! ships two implementations.
//!
//! - [`MemoryStore`]: in-process tree, used by tests and offline runs
//! - [`RestStore`]: `<database_url>/<path>.json` over HTTP
//!
//! ## Server requirements
//!
//! - `append` allocates a unique, time-ordered key (push id)
//! - `query` needs an index on the queried field; alias lookup requires
//!   `".indexOn": ["name"]` on `users/$user/private/aliases`
//!
//! ## Adding a New Store
//!
//! 1. Implement the `DocumentStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

mod memory;
pub mod paths;
mod push_id;
mod rest;

pub use memory::{MemoryStore, WriteOp};
pub use push_id::PushIdGenerator;
pub use rest::{RestStore, RetryPolicy};

/// Tree-addressed document store.
///
/// All calls block until the store has acknowledged them; there is no
/// ordering between calls beyond program order.
pub trait DocumentStore {
    /// Snapshot of the subtree at `path`, `None` when nothing is stored.
    fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Replace the subtree at `path`. Writing `null` removes it.
    fn set(&self, path: &str, value: &Value) -> Result<()>;

    /// Add a child under `path` with a server-generated key and return the key.
    fn append(&self, path: &str, value: &Value) -> Result<String>;

    /// Merge `fields` into the object at `path`. `null` fields are removed.
    fn update(&self, path: &str, fields: &Map<String, Value>) -> Result<()>;

    /// Delete the subtree at `path`. Deleting nothing is not an error.
    fn remove(&self, path: &str) -> Result<()>;

    /// Children of `path` whose `order_by` field equals `equal_to`, in key
    /// order, at most `limit` of them.
    fn query(
        &self,
        path: &str,
        order_by: &str,
        equal_to: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>>;
}

/// Read and deserialize the value at `path`.
pub fn read<T: DeserializeOwned>(store: &dyn DocumentStore, path: &str) -> Result<Option<T>> {
    match store.get(path)? {
        None => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| malformed(path, e)),
    }
}

/// Children of `path` as raw values, in key order.
pub fn children(store: &dyn DocumentStore, path: &str) -> Result<Vec<(String, Value)>> {
    match store.get(path)? {
        None => Ok(Vec::new()),
        Some(Value::Object(map)) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Ok(entries)
        }
        Some(_) => Err(StoreError::Malformed {
            path: path.to_string(),
            reason: "expected an object".to_string(),
        }
        .into()),
    }
}

/// Serialize a record for writing.
pub fn to_value<T: Serialize>(path: &str, record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| malformed(path, e))
}

/// Serialize a record into a field map for `update`.
pub fn to_fields<T: Serialize>(path: &str, record: &T) -> Result<Map<String, Value>> {
    match to_value(path, record)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Malformed {
            path: path.to_string(),
            reason: "expected an object".to_string(),
        }
        .into()),
    }
}

pub(crate) fn malformed(path: &str, e: serde_json::Error) -> crate::error::Error {
    StoreError::Malformed {
        path: path.to_string(),
        reason: e.to_string(),
    }
    .into()
}
