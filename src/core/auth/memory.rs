//! In-process accounts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Account, Authenticator};
use crate::error::{AuthError, Result};

#[derive(Debug, Clone)]
struct Record {
    uid: String,
    password: String,
    verified: bool,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Record>,
    verification_mails: Vec<String>,
}

/// In-memory [`Authenticator`]. Clones share the same accounts.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuth {
    state: Arc<Mutex<State>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account's email as verified.
    pub fn verify(&self, email: &str) {
        if let Some(record) = self.lock().accounts.get_mut(email) {
            record.verified = true;
        }
    }

    /// Addresses a verification mail was sent to, oldest first.
    pub fn verification_mails(&self) -> Vec<String> {
        self.lock().verification_mails.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn account(email: &str, record: &Record) -> Account {
        Account {
            uid: record.uid.clone(),
            email: email.to_string(),
            email_verified: record.verified,
            id_token: format!("memory-token-{}", record.uid),
        }
    }
}

impl Authenticator for MemoryAuth {
    fn sign_in(&self, email: &str, password: &str) -> Result<Account> {
        let state = self.lock();
        match state.accounts.get(email) {
            Some(record) if record.password == password => Ok(Self::account(email, record)),
            Some(_) => Err(AuthError::Rejected("wrong password".to_string()).into()),
            None => Err(AuthError::Rejected("no account for this email".to_string()).into()),
        }
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Account> {
        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(AuthError::Rejected("email already registered".to_string()).into());
        }
        let record = Record {
            uid: format!("uid-{}", state.accounts.len() + 1),
            password: password.to_string(),
            verified: false,
        };
        let account = Self::account(email, &record);
        state.accounts.insert(email.to_string(), record);
        Ok(account)
    }

    fn send_verification(&self, account: &Account) -> Result<()> {
        self.lock().verification_mails.push(account.email.clone());
        Ok(())
    }

    fn change_password(&self, account: &Account, new_password: &str) -> Result<()> {
        let mut state = self.lock();
        match state.accounts.get_mut(&account.email) {
            Some(record) => {
                record.password = new_password.to_string();
                Ok(())
            }
            None => Err(AuthError::Rejected("no account for this email".to_string()).into()),
        }
    }
}
