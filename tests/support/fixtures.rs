//! In-memory backend shared by several users.

use pnut::core::auth::{Authenticator, MemoryAuth};
use pnut::core::config::Settings;
use pnut::core::store::MemoryStore;
use pnut::core::vault::{self, Vault};

pub const PASSWORD: &str = "Pe4nut!butter";

/// One store and one auth service, as a deployed backend would be.
#[derive(Clone, Default)]
pub struct Backend {
    pub store: MemoryStore,
    pub auth: MemoryAuth,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register, verify and log in a user with default settings.
    pub fn user(&self, email: &str) -> Vault {
        self.user_with(email, Settings::default())
    }

    pub fn user_with(&self, email: &str, settings: Settings) -> Vault {
        if self.auth.sign_in(email, PASSWORD).is_err() {
            vault::register(&self.auth, email, PASSWORD).expect("register");
            self.auth.verify(email);
        }
        let account = vault::sign_in(&self.auth, email, PASSWORD).expect("sign in");
        Vault::provision(Box::new(self.store.clone()), account, settings).expect("provision")
    }
}

/// Texts of every readable item, oldest first.
pub fn texts(vault: &Vault) -> Vec<String> {
    vault
        .list(None)
        .expect("list")
        .into_iter()
        .map(|e| e.expect("readable item").text)
        .collect()
}
