//! Tree paths for one user's data.
//!
//! Store paths cannot contain `.`, so an email becomes a path segment by
//! replacing every `.` with `_`. The reverse mapping is lossy for addresses
//! that already contain `_`; it is only used for display.

use crate::core::constants::tree;
use crate::error::{Result, StoreError};

/// Characters a single path segment may not contain.
const FORBIDDEN: &[char] = &['/', '.', '#', '$', '[', ']'];

/// Path-safe form of an email.
pub fn email_key(email: &str) -> String {
    email.trim().replace('.', "_")
}

/// Display form of an email key.
pub fn email_from_key(key: &str) -> String {
    key.replace('_', ".")
}

/// Check that `key` is usable as a single path segment.
pub fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(FORBIDDEN) || key.chars().any(char::is_control) {
        return Err(StoreError::InvalidPath(key.to_string()).into());
    }
    Ok(())
}

/// Check every segment of a `/`-separated path.
pub fn check_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StoreError::InvalidPath(path.to_string()).into());
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment.contains(FORBIDDEN) || segment.chars().any(char::is_control)
        {
            return Err(StoreError::InvalidPath(path.to_string()).into());
        }
    }
    Ok(())
}

/// Paths under `users/<email_key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTree {
    root: String,
}

impl UserTree {
    pub fn new(email: &str) -> Self {
        Self {
            root: format!("{}/{}", tree::USERS, email_key(email)),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// World-readable profile: uid, email, public key.
    pub fn public(&self) -> String {
        format!("{}/{}", self.root, tree::PUBLIC)
    }

    pub fn public_key(&self) -> String {
        format!("{}/{}", self.public(), tree::PUBLIC_KEY)
    }

    /// Owner-only subtree.
    pub fn private(&self) -> String {
        format!("{}/{}", self.root, tree::PRIVATE)
    }

    pub fn private_key(&self) -> String {
        format!("{}/{}", self.private(), tree::PRIVATE_KEY)
    }

    /// Inbox of shares from other users. Writable by others.
    pub fn pending(&self) -> String {
        format!("{}/{}", self.public(), tree::PENDING)
    }

    pub fn pending_entry(&self, key: &str) -> String {
        format!("{}/{}", self.pending(), key)
    }

    pub fn stash(&self) -> String {
        format!("{}/{}", self.private(), tree::STASH)
    }

    pub fn stash_item(&self, key: &str) -> String {
        format!("{}/{}", self.stash(), key)
    }

    pub fn categories(&self) -> String {
        format!("{}/{}", self.private(), tree::CATEGORIES)
    }

    pub fn category(&self, key: &str) -> String {
        format!("{}/{}", self.categories(), key)
    }

    pub fn contacts(&self) -> String {
        format!("{}/{}", self.private(), tree::CONTACTS)
    }

    pub fn contact(&self, email: &str) -> String {
        format!("{}/{}", self.contacts(), email_key(email))
    }

    /// Aliases share keys with the stash items they point at.
    pub fn aliases(&self) -> String {
        format!("{}/{}", self.private(), tree::ALIASES)
    }

    pub fn alias(&self, key: &str) -> String {
        format!("{}/{}", self.aliases(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_key() {
        assert_eq!(email_key("alice.b@example.com"), "alice_b@example_com");
        assert_eq!(email_from_key("alice_b@example_com"), "alice.b@example.com");
    }

    #[test]
    fn test_user_tree_layout() {
        let t = UserTree::new("bob@example.com");
        assert_eq!(t.root(), "users/bob@example_com");
        assert_eq!(t.public_key(), "users/bob@example_com/public/publicKey");
        assert_eq!(t.private_key(), "users/bob@example_com/private/privateKey");
        assert_eq!(t.pending(), "users/bob@example_com/public/pending-text");
        assert_eq!(
            t.stash_item("-NabC"),
            "users/bob@example_com/private/peanut-stash/-NabC"
        );
        assert_eq!(
            t.contact("eve@corp.io"),
            "users/bob@example_com/private/contacts/eve@corp_io"
        );
        assert_eq!(t.alias("-K1"), "users/bob@example_com/private/aliases/-K1");
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("-NxYz_09").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("a/b").is_err());
        assert!(check_key("..").is_err());
        assert!(check_key("a#b").is_err());
        assert!(check_key("a[0]").is_err());
    }

    #[test]
    fn test_check_path() {
        assert!(check_path("users/a@b_com/private").is_ok());
        assert!(check_path("users//private").is_err());
        assert!(check_path("users/a.b").is_err());
        assert!(check_path("").is_err());
    }
}
