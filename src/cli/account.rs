//! Account commands: register, login, logout, reset, whoami, server.

use std::path::Path;

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::{self, Prompt};
use crate::core::config::ServerConfig;
use crate::core::session::SessionCache;
use crate::core::vault::{self, Remote, Vault};
use crate::error::{Result, ValidationError};

/// Ask for a password. `None` when the user gave nothing.
fn ask_password(label: &str) -> Result<Option<Zeroizing<String>>> {
    Ok(match prompt::password(label)? {
        Prompt::Value(p) => Some(p),
        Prompt::Empty | Prompt::Cancelled => None,
    })
}

/// Ask for a new password twice.
fn ask_new_password(label: &str) -> Result<Option<Zeroizing<String>>> {
    let Some(first) = ask_password(label)? else {
        return Ok(None);
    };
    let Some(second) = ask_password("confirm password")? else {
        return Ok(None);
    };
    if first.as_str() != second.as_str() {
        return Err(ValidationError::PasswordMismatch.into());
    }
    Ok(Some(first))
}

pub fn register(email: &str) -> Result<()> {
    let Some(password) = ask_new_password("password")? else {
        output::dimmed("cancelled");
        return Ok(());
    };

    info!(email, "registering");
    let remote = Remote::load()?;
    vault::register(&remote.auth()?, email, &password)?;
    output::success(&format!("registered {}", output::label(email)));
    output::hint("open the verification link we mailed you, then run: pnut login <email>");
    Ok(())
}

pub fn login(email: &str) -> Result<()> {
    let Some(password) = ask_password("password")? else {
        output::dimmed("cancelled");
        return Ok(());
    };

    info!(email, "logging in");
    let vault = Vault::login(email, &password)?;
    output::success(&format!("logged in as {}", output::label(vault.email())));

    let waiting = vault.pending_count()?;
    if waiting > 0 {
        output::hint(&format!(
            "{} shared item{} waiting, run: pnut inbox",
            waiting,
            if waiting == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    if vault::logout(&SessionCache::open()?)? {
        output::success("logged out");
    } else {
        output::dimmed("not logged in");
    }
    Ok(())
}

/// Change the password of the logged-in account. Ends the session.
pub fn reset() -> Result<()> {
    let cache = SessionCache::open()?;
    let Some(current) = ask_password("current password")? else {
        output::dimmed("cancelled");
        return Ok(());
    };
    let Some(new) = ask_new_password("new password")? else {
        output::dimmed("cancelled");
        return Ok(());
    };

    let remote = Remote::load()?;
    vault::change_password(&remote.auth()?, &cache, &current, &new)?;
    output::success("password changed");
    output::hint("run: pnut login <email>");
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let vault = Vault::open()?;
    let identity = vault.identity();
    let pending = vault.pending_count()?;

    if json {
        return output::json(&serde_json::json!({
            "email": identity.email(),
            "uid": identity.user_id(),
            "publicKey": identity.public_key(),
            "pending": pending,
        }));
    }

    output::kv("email", identity.email());
    output::kv("uid", identity.user_id());
    output::kv("key", identity.public_key());
    if pending > 0 {
        output::kv("pending", pending);
    }
    Ok(())
}

/// Show, replace or reset the server record.
pub fn server(source: Option<&str>) -> Result<()> {
    match source {
        None => {
            let config = ServerConfig::load()?;
            output::kv("database", &config.database_url);
            if let Some(project) = &config.project_id {
                output::kv("project", project);
            }
            if let Some(emulator) = &config.auth_emulator {
                output::kv("auth emulator", emulator);
            }
        }
        Some("default") => {
            ServerConfig::reset()?;
            output::success("server reset to local emulator defaults");
        }
        Some(path) => {
            let config = ServerConfig::load_from(Path::new(path))?;
            let saved = config.save()?;
            info!(path = %saved.display(), "server config saved");
            output::success(&format!("server set to {}", output::label(&config.database_url)));
            output::hint("run: pnut login <email>");
        }
    }
    Ok(())
}
