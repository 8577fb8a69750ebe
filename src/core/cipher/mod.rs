//! Cryptographic operations.
//!
//! Two ciphers live here:
//!
//! - **age** ([`Age`]): public-key encryption of items, notes and shares.
//!   age is hybrid by construction (an X25519 key agreement wraps a
//!   per-message ChaCha20-Poly1305 file key), so payload size is not bounded
//!   by the key size.
//! - **session** ([`session`]): AES-256-CBC used only for the local session
//!   cache, keyed by the machine identifier.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::error::Result;
use ::age::x25519;

mod age;
pub mod session;

pub use age::{parse_identity, parse_recipient, Age};

/// Public-key cipher backend.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Type representing a private identity/key.
    type Identity;

    /// Encrypt plaintext for a single recipient.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn encrypt(&self, plaintext: &str, recipient: &Self::Recipient) -> Result<String>;

    /// Decrypt an encrypted string using a private identity.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` for malformed ciphertext or
    /// the wrong key.
    fn decrypt(&self, encrypted: &str, identity: &Self::Identity) -> Result<String>;
}

/// Encrypt plaintext for an age recipient.
pub fn encrypt(plaintext: &str, recipient: &x25519::Recipient) -> Result<String> {
    Age.encrypt(plaintext, recipient)
}

/// Decrypt an age-encrypted string using a private identity.
pub fn decrypt(encrypted: &str, identity: &x25519::Identity) -> Result<String> {
    Age.decrypt(encrypted, identity)
}
