//! In-process document store.
//!
//! Holds the whole tree as one `serde_json::Value`. Clones share the same
//! tree, so two vaults built on clones of one store see each other's writes,
//! like two clients of one server. Counts writes and can be told to fail the
//! next call of a given kind.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::trace;

use super::paths::check_path;
use super::{DocumentStore, PushIdGenerator};
use crate::error::{Result, StoreError};

/// Kinds of write, for counting and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOp {
    Set,
    Append,
    Update,
    Remove,
}

#[derive(Debug, Default)]
struct State {
    root: Value,
    ids: PushIdGenerator,
    writes: usize,
    fail_next: HashSet<WriteOp>,
}

/// In-memory [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                root: Value::Object(Map::new()),
                ..State::default()
            })),
        }
    }

    /// Number of acknowledged writes since creation.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make the next write of kind `op` fail with a network error.
    pub fn fail_next(&self, op: WriteOp) {
        self.lock().fail_next.insert(op);
    }

    /// Copy of the whole tree.
    pub fn snapshot(&self) -> Value {
        self.lock().root.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin_write(state: &mut State, op: WriteOp, path: &str) -> Result<()> {
        check_path(path)?;
        if state.fail_next.remove(&op) {
            return Err(StoreError::Network(format!("injected {:?} failure at {}", op, path)).into());
        }
        state.writes += 1;
        trace!(?op, path, "memory store write");
        Ok(())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in segments(path) {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

fn write_at(root: &mut Value, path: &str, value: Value) {
    let parts = segments(path);
    let value = strip_nulls(value);
    if value.is_null() || matches!(&value, Value::Object(m) if m.is_empty()) {
        remove_at(root, &parts);
        return;
    }

    let mut node = root;
    for segment in &parts[..parts.len() - 1] {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return,
        };
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        map.insert(parts[parts.len() - 1].to_string(), value);
    }
}

/// Remove the node at `parts` and prune parents left empty.
fn remove_at(node: &mut Value, parts: &[&str]) -> bool {
    let Some(map) = node.as_object_mut() else {
        return false;
    };
    match parts {
        [] => false,
        [last] => {
            map.remove(*last);
            map.is_empty()
        }
        [first, rest @ ..] => {
            let now_empty = match map.get_mut(*first) {
                Some(child) => remove_at(child, rest),
                None => false,
            };
            if now_empty {
                map.remove(*first);
            }
            map.is_empty()
        }
    }
}

/// Stored trees never contain nulls or empty objects.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .filter(|(_, v)| !matches!(v, Value::Object(m) if m.is_empty()))
                .collect(),
        ),
        other => other,
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, path: &str) -> Result<Option<Value>> {
        check_path(path)?;
        let state = self.lock();
        Ok(lookup(&state.root, path).cloned())
    }

    fn set(&self, path: &str, value: &Value) -> Result<()> {
        let mut state = self.lock();
        Self::begin_write(&mut state, WriteOp::Set, path)?;
        write_at(&mut state.root, path, value.clone());
        Ok(())
    }

    fn append(&self, path: &str, value: &Value) -> Result<String> {
        let mut state = self.lock();
        Self::begin_write(&mut state, WriteOp::Append, path)?;
        let key = state.ids.next_id();
        write_at(&mut state.root, &format!("{}/{}", path, key), value.clone());
        Ok(key)
    }

    fn update(&self, path: &str, fields: &Map<String, Value>) -> Result<()> {
        let mut state = self.lock();
        let children = fields
            .iter()
            .map(|(field, value)| {
                let child = format!("{}/{}", path, field);
                check_path(&child).map(|()| (child, value))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::begin_write(&mut state, WriteOp::Update, path)?;
        for (child, value) in children {
            write_at(&mut state.root, &child, value.clone());
        }
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        let mut state = self.lock();
        Self::begin_write(&mut state, WriteOp::Remove, path)?;
        remove_at(&mut state.root, &segments(path));
        Ok(())
    }

    fn query(
        &self,
        path: &str,
        order_by: &str,
        equal_to: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>> {
        check_path(path)?;
        let state = self.lock();
        let Some(Value::Object(map)) = lookup(&state.root, path) else {
            return Ok(Vec::new());
        };

        // Object maps iterate in key order, which is the tie-break for equal values.
        Ok(map
            .iter()
            .filter(|(_, child)| child.get(order_by).and_then(Value::as_str) == Some(equal_to))
            .take(limit)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("users/a/public", &json!({ "email": "a" })).unwrap();
        assert_eq!(
            store.get("users/a/public/email").unwrap(),
            Some(json!("a"))
        );

        store.remove("users/a/public").unwrap();
        assert_eq!(store.get("users/a/public").unwrap(), None);
        // Empty parents are pruned.
        assert_eq!(store.get("users").unwrap(), None);
    }

    #[test]
    fn test_append_keys_ascend() {
        let store = MemoryStore::new();
        let a = store.append("list", &json!(1)).unwrap();
        let b = store.append("list", &json!(2)).unwrap();
        let c = store.append("list", &json!(3)).unwrap();
        assert!(a < b && b < c);
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn test_update_merges_and_nulls_delete() {
        let store = MemoryStore::new();
        store
            .set("item", &json!({ "data": "x", "category": "default", "note": "n" }))
            .unwrap();

        let mut fields = Map::new();
        fields.insert("category".into(), json!("infra"));
        fields.insert("note".into(), Value::Null);
        store.update("item", &fields).unwrap();

        assert_eq!(
            store.get("item").unwrap(),
            Some(json!({ "data": "x", "category": "infra" }))
        );
    }

    #[test]
    fn test_update_with_bad_field_writes_nothing() {
        let store = MemoryStore::new();
        store.set("item", &json!({ "data": "x" })).unwrap();
        let writes = store.write_count();

        let mut fields = Map::new();
        fields.insert("category".into(), json!("infra"));
        fields.insert("zone.bad".into(), json!("y"));
        assert!(store.update("item", &fields).is_err());

        assert_eq!(store.get("item").unwrap(), Some(json!({ "data": "x" })));
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_set_null_removes() {
        let store = MemoryStore::new();
        store.set("a/b", &json!(1)).unwrap();
        store.set("a/b", &Value::Null).unwrap();
        assert_eq!(store.get("a/b").unwrap(), None);
    }

    #[test]
    fn test_query_first_match_in_key_order() {
        let store = MemoryStore::new();
        store.set("aliases/k2", &json!({ "name": "deploy" })).unwrap();
        store.set("aliases/k1", &json!({ "name": "deploy" })).unwrap();
        store.set("aliases/k0", &json!({ "name": "build" })).unwrap();

        let hits = store.query("aliases", "name", "deploy", 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "k1");

        let all = store.query("aliases", "name", "deploy", 10).unwrap();
        assert_eq!(all.len(), 2);
        assert!(store.query("aliases", "name", "nope", 1).unwrap().is_empty());
        assert!(store.query("missing", "name", "x", 1).unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_tree() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("x", &json!(true)).unwrap();
        assert_eq!(b.get("x").unwrap(), Some(json!(true)));
    }

    #[test]
    fn test_fail_next_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next(WriteOp::Remove);
        store.set("a", &json!(1)).unwrap();

        let err = store.remove("a").unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Network(_))));
        assert_eq!(store.get("a").unwrap(), Some(json!(1)));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_invalid_paths_rejected() {
        let store = MemoryStore::new();
        assert!(store.set("a/../b", &json!(1)).is_err());
        assert!(store.get("").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
