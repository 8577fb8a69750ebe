//! Keypair provisioning and lookup.
//!
//! Each account gets one age keypair, created the first time it signs in.
//! The public half goes to `users/<key>/public` where any signed-in user can
//! read it; the private half goes to `users/<key>/private`, readable only by
//! the owner. Keys are never rotated.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::auth::Account;
use crate::core::domain::Identity;
use crate::core::store::paths::UserTree;
use crate::core::store::{self, DocumentStore};
use crate::core::types::PublicKey;
use crate::error::{AuthError, Result};

/// Load the account's identity, creating and publishing one if none exists.
///
/// Idempotent. A half-finished earlier run (private key stored, public key
/// missing) is repaired by republishing the public half.
pub fn provision(store: &dyn DocumentStore, account: &Account) -> Result<Identity> {
    let tree = UserTree::new(&account.email);

    let identity = match store::read::<String>(store, &tree.private_key())? {
        Some(private_key) => {
            debug!(email = %account.email, "keypair already provisioned");
            Identity::from_private_key(&account.uid, &account.email, &private_key)?
        }
        None => {
            let identity = Identity::generate(&account.uid, &account.email);
            let (_, private) = identity.profiles();
            // Merge so siblings (stash, contacts, ...) are never clobbered.
            store.update(&tree.private(), &store::to_fields(&tree.private(), &private)?)?;
            info!(email = %account.email, "keypair provisioned");
            identity
        }
    };

    let published = store::read::<String>(store, &tree.public_key())?;
    if published.as_deref() != Some(identity.public_key()) {
        if published.is_some() {
            warn!(email = %account.email, "published key does not match private key, republishing");
        }
        let (public, _) = identity.profiles();
        store.update(&tree.public(), &store::to_fields(&tree.public(), &public)?)?;
    }

    Ok(identity)
}

/// Load an existing identity.
///
/// # Errors
///
/// `AuthError::NotProvisioned` if the account never signed in.
pub fn load(store: &dyn DocumentStore, account: &Account) -> Result<Identity> {
    let tree = UserTree::new(&account.email);
    let private_key = store::read::<String>(store, &tree.private_key())?
        .ok_or_else(|| AuthError::NotProvisioned(account.email.clone()))?;
    Identity::from_private_key(&account.uid, &account.email, &private_key)
}

/// Published public key of any user, `None` if they have none.
pub fn lookup_public_key(store: &dyn DocumentStore, email: &str) -> Result<Option<PublicKey>> {
    let tree = UserTree::new(email);
    match store.get(&tree.public_key())? {
        Some(Value::String(key)) if !key.trim().is_empty() => Ok(Some(key)),
        _ => Ok(None),
    }
}
