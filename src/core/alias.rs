//! Named shortcuts to stash items.
//!
//! An alias is stored as `{ name }` under the same key as the item it points
//! at, in the parallel `aliases` collection, so each item has at most one
//! alias and the alias never copies the text. Lookup by name is an indexed
//! query (`orderBy=name`, `equalTo=<name>`, `limitToFirst=1`).
//!
//! Names are not unique. When two items carry the same alias the one with
//! the lowest key (the oldest item) wins.

use tracing::{debug, info};

use crate::core::constants::tree::ALIAS_INDEX_FIELD;
use crate::core::domain::{Alias, Item, NameRecord};
use crate::core::stash::Stash;
use crate::core::store::paths::{check_key, UserTree};
use crate::core::store::{self, DocumentStore};
use crate::core::template;
use crate::core::validation::validate_alias;
use crate::error::{Error, Result};

/// An alias resolved to a runnable command.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub alias: Alias,
    pub item: Item,
    pub command: String,
}

pub struct Aliases<'a> {
    store: &'a dyn DocumentStore,
    tree: UserTree,
}

impl<'a> Aliases<'a> {
    pub fn new(store: &'a dyn DocumentStore, email: &str) -> Self {
        Self {
            store,
            tree: UserTree::new(email),
        }
    }

    /// Point `name` at an item, replacing any alias the item already had.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if the item does not exist; a validation error for
    /// an empty name or one containing whitespace.
    pub fn bind(&self, stash: &Stash<'_>, key: &str, name: &str) -> Result<()> {
        validate_alias(name)?;
        if !stash.contains(key)? {
            return Err(Error::not_found("item", key));
        }
        let path = self.tree.alias(key);
        self.store
            .set(&path, &store::to_value(&path, &NameRecord::new(name))?)?;
        info!(key, name, "alias bound");
        Ok(())
    }

    /// Drop the alias on an item. Returns whether there was one.
    pub fn unbind(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        let path = self.tree.alias(key);
        if self.store.get(&path)?.is_none() {
            return Ok(false);
        }
        self.store.remove(&path)?;
        info!(key, "alias removed");
        Ok(true)
    }

    /// All aliases in key order.
    pub fn list(&self) -> Result<Vec<Alias>> {
        Ok(store::children(self.store, &self.tree.aliases())?
            .into_iter()
            .filter_map(|(key, value)| {
                serde_json::from_value::<NameRecord>(value)
                    .ok()
                    .map(|r| Alias { key, name: r.name })
            })
            .collect())
    }

    /// First alias with this name.
    pub fn find(&self, name: &str) -> Result<Option<Alias>> {
        let hits = self
            .store
            .query(&self.tree.aliases(), ALIAS_INDEX_FIELD, name, 1)?;
        Ok(hits.into_iter().next().map(|(key, _)| Alias {
            key,
            name: name.to_string(),
        }))
    }

    /// Look up `name`, decrypt its item and fill the placeholders from `args`.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if no alias has this name or its item is gone.
    pub fn resolve<S: AsRef<str>>(&self, stash: &Stash<'_>, name: &str, args: &[S]) -> Result<Resolved> {
        let alias = self
            .find(name)?
            .ok_or_else(|| Error::not_found("alias", name))?;
        debug!(name, key = %alias.key, "alias matched");

        let item = stash.get(&alias.key).map_err(|e| match e {
            Error::NotFound { .. } => Error::not_found("aliased item", alias.key.clone()),
            other => other,
        })?;
        let command = template::substitute(&item.text, args);

        Ok(Resolved {
            alias,
            item,
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Identity;
    use crate::core::store::MemoryStore;

    #[test]
    fn test_bind_and_resolve() {
        let store = MemoryStore::new();
        let id = Identity::generate("uid", "a@example.com");
        let stash = Stash::new(&store, &id, 2048);
        let aliases = Aliases::new(&store, id.email());

        let key = stash.append("kubectl apply -f ${file}", None, None).unwrap();
        aliases.bind(&stash, &key, "deploy").unwrap();

        let resolved = aliases.resolve(&stash, "deploy", &["svc.yaml"]).unwrap();
        assert_eq!(resolved.command, "kubectl apply -f svc.yaml");
        assert_eq!(resolved.alias.key, key);
    }

    #[test]
    fn test_bind_missing_item() {
        let store = MemoryStore::new();
        let id = Identity::generate("uid", "a@example.com");
        let stash = Stash::new(&store, &id, 2048);
        let aliases = Aliases::new(&store, id.email());
        assert!(matches!(
            aliases.bind(&stash, "-nope", "x").unwrap_err(),
            Error::NotFound { kind: "item", .. }
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_unknown_alias() {
        let store = MemoryStore::new();
        let id = Identity::generate("uid", "a@example.com");
        let stash = Stash::new(&store, &id, 2048);
        let aliases = Aliases::new(&store, id.email());
        let err = aliases.resolve(&stash, "nope", &[] as &[&str]).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "alias", .. }));
    }

    #[test]
    fn test_rebind_replaces_name() {
        let store = MemoryStore::new();
        let id = Identity::generate("uid", "a@example.com");
        let stash = Stash::new(&store, &id, 2048);
        let aliases = Aliases::new(&store, id.email());

        let key = stash.append("ls", None, None).unwrap();
        aliases.bind(&stash, &key, "l").unwrap();
        aliases.bind(&stash, &key, "ll").unwrap();

        let all = aliases.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "ll");
        assert!(aliases.find("l").unwrap().is_none());
    }

    #[test]
    fn test_unbind() {
        let store = MemoryStore::new();
        let id = Identity::generate("uid", "a@example.com");
        let stash = Stash::new(&store, &id, 2048);
        let aliases = Aliases::new(&store, id.email());

        let key = stash.append("ls", None, None).unwrap();
        aliases.bind(&stash, &key, "l").unwrap();
        assert!(aliases.unbind(&key).unwrap());
        assert!(!aliases.unbind(&key).unwrap());
        assert!(aliases.list().unwrap().is_empty());
    }
}
