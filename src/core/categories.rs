//! Category labels.
//!
//! A category is a free-standing `{ name }` record. Items carry the name as
//! a plain string, so removing a label never touches any item, and items may
//! use names that have no label at all.

use tracing::info;

use crate::core::domain::{Category, NameRecord};
use crate::core::store::paths::{check_key, UserTree};
use crate::core::store::{self, DocumentStore};
use crate::core::validation::validate_not_empty;
use crate::error::{Error, Result};

pub struct Categories<'a> {
    store: &'a dyn DocumentStore,
    tree: UserTree,
}

impl<'a> Categories<'a> {
    pub fn new(store: &'a dyn DocumentStore, email: &str) -> Self {
        Self {
            store,
            tree: UserTree::new(email),
        }
    }

    /// Add a label. Duplicate names are allowed.
    pub fn add(&self, name: &str) -> Result<String> {
        validate_not_empty("category name", name)?;
        let path = self.tree.categories();
        let record = NameRecord::new(name.trim());
        let key = self.store.append(&path, &store::to_value(&path, &record)?)?;
        info!(key = %key, name = %record.name, "category added");
        Ok(key)
    }

    /// All labels in key order. Malformed records are skipped.
    pub fn list(&self) -> Result<Vec<Category>> {
        Ok(store::children(self.store, &self.tree.categories())?
            .into_iter()
            .filter_map(|(key, value)| {
                serde_json::from_value::<NameRecord>(value)
                    .ok()
                    .map(|r| Category { key, name: r.name })
            })
            .collect())
    }

    /// Delete a label record.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if no label has this key.
    pub fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;
        let path = self.tree.category(key);
        if self.store.get(&path)?.is_none() {
            return Err(Error::not_found("category", key));
        }
        self.store.remove(&path)?;
        info!(key, "category removed");
        Ok(())
    }

    /// Find a label by exact name, first in key order.
    pub fn find(&self, name: &str) -> Result<Option<Category>> {
        Ok(self.list()?.into_iter().find(|c| c.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    #[test]
    fn test_add_list_remove() {
        let store = MemoryStore::new();
        let cats = Categories::new(&store, "a@example.com");

        let k1 = cats.add("infra").unwrap();
        let k2 = cats.add("infra").unwrap();
        assert_ne!(k1, k2);
        assert_eq!(cats.list().unwrap().len(), 2);

        cats.remove(&k1).unwrap();
        let left = cats.list().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].key, k2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let store = MemoryStore::new();
        let cats = Categories::new(&store, "a@example.com");
        assert!(cats.add("   ").is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_remove_missing() {
        let store = MemoryStore::new();
        let cats = Categories::new(&store, "a@example.com");
        assert!(matches!(
            cats.remove("-nope").unwrap_err(),
            Error::NotFound {
                kind: "category",
                ..
            }
        ));
    }

    #[test]
    fn test_find() {
        let store = MemoryStore::new();
        let cats = Categories::new(&store, "a@example.com");
        cats.add("docker").unwrap();
        assert!(cats.find("docker").unwrap().is_some());
        assert!(cats.find("k8s").unwrap().is_none());
    }
}
