//! Remote authentication.
//!
//! Email/password accounts live in an external service. The crate only
//! needs four calls from it, captured by [`Authenticator`].
//!
//! - [`FirebaseAuth`]: identity-toolkit v1 REST endpoints (or the local
//!   emulator)
//! - [`MemoryAuth`]: in-process accounts for tests and offline runs

use crate::core::types::{Email, UserId};
use crate::error::Result;

mod firebase;
mod memory;

pub use firebase::FirebaseAuth;
pub use memory::MemoryAuth;

/// A signed-in account.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub uid: UserId,
    pub email: Email,
    pub email_verified: bool,
    /// Bearer token for the document store.
    pub id_token: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("email_verified", &self.email_verified)
            .field("id_token", &"<redacted>")
            .finish()
    }
}

/// Email/password authentication service.
pub trait Authenticator {
    /// Sign in with existing credentials.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` for unknown accounts or wrong passwords.
    fn sign_in(&self, email: &str, password: &str) -> Result<Account>;

    /// Create a new, unverified account and sign it in.
    fn sign_up(&self, email: &str, password: &str) -> Result<Account>;

    /// Mail a verification link to the account's address.
    fn send_verification(&self, account: &Account) -> Result<()>;

    /// Replace the account's password.
    fn change_password(&self, account: &Account, new_password: &str) -> Result<()>;
}
