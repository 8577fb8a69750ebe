//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A store-assigned key (time-ordered push id).
pub type ItemKey = String;

/// Armored age ciphertext.
pub type EncryptedValue = String;

/// An age public key string (starts with "age1...").
pub type PublicKey = String;

/// An account email address, in its natural dotted form.
pub type Email = String;

/// The auth service's user id.
pub type UserId = String;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;
