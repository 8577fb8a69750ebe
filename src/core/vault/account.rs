//! Account lifecycle: register, sign in, log out, change password.
//!
//! These run before (or without) a [`Vault`](super::Vault), so they take the
//! authenticator and session cache explicitly.

use tracing::info;

use crate::core::auth::{Account, Authenticator};
use crate::core::session::SessionCache;
use crate::core::validation::{validate_email, validate_password};
use crate::error::{AuthError, Result};

/// Create an account and mail its verification link.
///
/// The account cannot log in until the link is followed.
pub fn register(auth: &dyn Authenticator, email: &str, password: &str) -> Result<Account> {
    validate_email(email)?;
    validate_password(password)?;
    let account = auth.sign_up(email, password)?;
    auth.send_verification(&account)?;
    info!(email, "account registered");
    Ok(account)
}

/// Sign in and require a verified email.
///
/// # Errors
///
/// `AuthError::EmailNotVerified` if the verification link was not followed.
pub fn sign_in(auth: &dyn Authenticator, email: &str, password: &str) -> Result<Account> {
    validate_email(email)?;
    let account = auth.sign_in(email, password)?;
    if !account.email_verified {
        return Err(AuthError::EmailNotVerified(account.email).into());
    }
    Ok(account)
}

/// Forget the cached session. Returns whether one existed.
pub fn logout(cache: &SessionCache) -> Result<bool> {
    let existed = cache.clear()?;
    if existed {
        info!("logged out");
    }
    Ok(existed)
}

/// Change the cached account's password and end the session.
///
/// # Errors
///
/// `AuthError::Rejected` if `current` does not match the cached password.
pub fn change_password(
    auth: &dyn Authenticator,
    cache: &SessionCache,
    current: &str,
    new: &str,
) -> Result<()> {
    let credentials = cache.restore()?;
    if credentials.password.as_str() != current {
        return Err(AuthError::Rejected("incorrect password".to_string()).into());
    }
    validate_password(new)?;

    let account = auth.sign_in(&credentials.email, current)?;
    auth.change_password(&account, new)?;
    cache.clear()?;
    info!(email = %credentials.email, "password changed");
    Ok(())
}
