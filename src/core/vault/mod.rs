//! The primary interface for pnut operations.
//!
//! A [`Vault`] is a signed-in account with its keypair and a connection to
//! the document store. Every command goes through one; nothing outside
//! `core` talks to the store directly.

mod account;
mod items;
mod labels;
mod sharing;

pub use account::{change_password, logout, register, sign_in};

use tracing::debug;

use crate::core::alias::Aliases;
use crate::core::auth::{Account, FirebaseAuth};
use crate::core::categories::Categories;
use crate::core::config::{ServerConfig, Settings};
use crate::core::contacts::Contacts;
use crate::core::domain::Identity;
use crate::core::identity;
use crate::core::session::SessionCache;
use crate::core::sharing::Sharing;
use crate::core::stash::Stash;
use crate::core::store::{DocumentStore, RestStore};
use crate::error::Result;

/// Server endpoints and client tunables, as configured on this machine.
#[derive(Debug, Clone)]
pub struct Remote {
    pub server: ServerConfig,
    pub settings: Settings,
}

impl Remote {
    pub fn load() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::load()?,
            settings: Settings::load()?,
        })
    }

    pub fn auth(&self) -> Result<FirebaseAuth> {
        FirebaseAuth::new(&self.server, self.settings.timeout())
    }

    /// Store client acting as `account`.
    pub fn store(&self, account: &Account) -> Result<RestStore> {
        Ok(RestStore::new(
            &self.server.database_url,
            self.settings.timeout(),
            self.settings.retry_policy(),
        )?
        .with_token(account.id_token.clone()))
    }
}

/// A signed-in user's view of the store.
pub struct Vault {
    store: Box<dyn DocumentStore>,
    account: Account,
    identity: Identity,
    settings: Settings,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("account", &self.account)
            .field("identity", &self.identity)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Vault {
    /// Open with the cached session against the configured server.
    ///
    /// # Errors
    ///
    /// `AuthError::NoSession` if nobody is logged in on this machine.
    pub fn open() -> Result<Self> {
        let credentials = SessionCache::open()?.restore()?;
        let remote = Remote::load()?;
        let account = sign_in(&remote.auth()?, &credentials.email, &credentials.password)?;
        let store = remote.store(&account)?;
        Self::connect(Box::new(store), account, remote.settings)
    }

    /// Sign in against the configured server, provision the keypair on first
    /// login, and cache the session for later invocations.
    pub fn login(email: &str, password: &str) -> Result<Self> {
        let remote = Remote::load()?;
        let account = sign_in(&remote.auth()?, email, password)?;
        let store = remote.store(&account)?;
        let vault = Self::provision(Box::new(store), account, remote.settings)?;
        SessionCache::open()?.store(email, password)?;
        Ok(vault)
    }

    /// Open for an already signed-in account whose keypair exists.
    pub fn connect(
        store: Box<dyn DocumentStore>,
        account: Account,
        settings: Settings,
    ) -> Result<Self> {
        let identity = identity::load(store.as_ref(), &account)?;
        debug!(email = %account.email, "vault opened");
        Ok(Self {
            store,
            account,
            identity,
            settings,
        })
    }

    /// Open for a signed-in account, creating its keypair on first use.
    pub fn provision(
        store: Box<dyn DocumentStore>,
        account: Account,
        settings: Settings,
    ) -> Result<Self> {
        let identity = identity::provision(store.as_ref(), &account)?;
        Ok(Self {
            store,
            account,
            identity,
            settings,
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn email(&self) -> &str {
        &self.account.email
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn stash(&self) -> Stash<'_> {
        Stash::new(
            self.store.as_ref(),
            &self.identity,
            self.settings.max_text_length,
        )
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self.store.as_ref(), self.email())
    }

    pub fn aliases(&self) -> Aliases<'_> {
        Aliases::new(self.store.as_ref(), self.email())
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(self.store.as_ref(), self.email())
    }

    pub fn sharing(&self) -> Sharing<'_> {
        Sharing::new(
            self.store.as_ref(),
            &self.identity,
            self.settings.max_text_length,
        )
    }
}
