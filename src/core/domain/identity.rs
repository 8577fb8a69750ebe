//! Identity type.
//!
//! A user's age keypair together with the account it belongs to. The private
//! half never leaves this type except to be written to the owner-only
//! profile at provisioning time.
//!
//! Keys are X25519 (about 128-bit security, above RSA-2048's 112). age wraps
//! a per-message file key, so payload size does not depend on the key.

use age::secrecy::ExposeSecret;
use age::x25519;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::{self, parse_identity};
use crate::core::types::{Email, PublicKey, UserId};
use crate::error::Result;

/// World-readable profile at `users/<key>/public`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub uid: UserId,
    pub email: Email,
    pub public_key: PublicKey,
}

/// Owner-only profile fields at `users/<key>/private`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateProfile {
    pub uid: UserId,
    pub private_key: String,
}

impl std::fmt::Debug for PrivateProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateProfile")
            .field("uid", &self.uid)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The active user's keypair.
pub struct Identity {
    user_id: UserId,
    email: Email,
    public_key: PublicKey,
    inner: x25519::Identity,
}

impl Identity {
    /// Fresh keypair for an account.
    pub fn generate(user_id: &str, email: &str) -> Self {
        debug!(email, "generating keypair");
        Self::from_inner(user_id, email, x25519::Identity::generate())
    }

    /// Rebuild from a stored private key. The public key is derived from it.
    pub fn from_private_key(user_id: &str, email: &str, private_key: &str) -> Result<Self> {
        Ok(Self::from_inner(user_id, email, parse_identity(private_key)?))
    }

    fn from_inner(user_id: &str, email: &str, inner: x25519::Identity) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            public_key: inner.to_public().to_string(),
            inner,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// `age1...` public key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// `AGE-SECRET-KEY-1...` private key.
    pub fn private_key(&self) -> Zeroizing<String> {
        Zeroizing::new(self.inner.to_string().expose_secret().to_string())
    }

    /// Profiles to publish for this identity.
    pub fn profiles(&self) -> (PublicProfile, PrivateProfile) {
        (
            PublicProfile {
                uid: self.user_id.clone(),
                email: self.email.clone(),
                public_key: self.public_key.clone(),
            },
            PrivateProfile {
                uid: self.user_id.clone(),
                private_key: self.private_key().to_string(),
            },
        )
    }

    /// Encrypt for this identity's own public key.
    pub fn seal(&self, plaintext: &str) -> Result<String> {
        cipher::encrypt(plaintext, &self.inner.to_public())
    }

    /// Decrypt something sealed for this identity.
    pub fn open(&self, ciphertext: &str) -> Result<Zeroizing<String>> {
        cipher::decrypt(ciphertext, &self.inner).map(Zeroizing::new)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
