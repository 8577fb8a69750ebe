//! Local session cache.
//!
//! Stores the login email and password, each encrypted with
//! [`cipher::session`](crate::core::cipher::session) under the machine key,
//! so later invocations can sign in without prompting. The record is an
//! opaque JSON object `{ "email": "...", "password": "..." }` with no schema
//! version.
//!
//! SECURITY: the key is derived from the machine id with no salt or KDF.
//! This protects against copying the file to another machine, nothing more.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::cipher::session::{decrypt_field, encrypt_field};
#[cfg(unix)]
use crate::core::validation::validate_file_permissions;
use crate::core::{config, constants, machine};
use crate::error::{AuthError, ConfigError, Result};

#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// On-disk record.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    email: String,
    password: String,
}

/// Decrypted credentials.
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session cache bound to one file and one key.
pub struct SessionCache {
    path: PathBuf,
    key: Zeroizing<Vec<u8>>,
}

impl SessionCache {
    /// Cache at the default location keyed by this machine.
    pub fn open() -> Result<Self> {
        let path = config::home_dir()?.join(constants::SESSION_FILE);
        Ok(Self::new(path, machine::session_key()?))
    }

    /// Cache at an explicit path with an explicit key.
    pub fn new(path: PathBuf, key: Zeroizing<Vec<u8>>) -> Self {
        Self { path, key }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Encrypt and persist credentials, replacing any previous record.
    pub fn store(&self, email: &str, password: &str) -> Result<()> {
        let record = SessionRecord {
            email: encrypt_field(email, &self.key)?,
            password: encrypt_field(password, &self.key)?,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFile {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let contents = serde_json::to_string(&record).map_err(|e| ConfigError::Parse {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let write_error = |source| ConfigError::WriteFile {
            path: self.path.display().to_string(),
            source,
        };

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(SESSION_FILE_MODE);
        }
        let mut file = options.open(&self.path).map_err(write_error)?;

        // `mode` only applies on creation; tighten a file left by an older run.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))
                .map_err(write_error)?;
        }
        file.write_all(contents.as_bytes()).map_err(write_error)?;

        debug!(path = %self.path.display(), "session cached");
        Ok(())
    }

    /// Load and decrypt the cached credentials.
    ///
    /// # Errors
    ///
    /// `AuthError::NoSession` if the file is absent; `AuthError::CorruptSession`
    /// if it cannot be read, parsed or decrypted with this machine's key.
    pub fn restore(&self) -> Result<Credentials> {
        if !self.path.exists() {
            return Err(AuthError::NoSession.into());
        }

        #[cfg(unix)]
        if let Err(e) = validate_file_permissions(&self.path, SESSION_FILE_MODE) {
            warn!(error = %e, "session file is readable by others");
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| AuthError::CorruptSession(format!("unreadable: {}", e)))?;
        let record: SessionRecord = serde_json::from_str(&contents)
            .map_err(|e| AuthError::CorruptSession(format!("not a session record: {}", e)))?;

        let email = decrypt_field(&record.email, &self.key)?;
        let password = decrypt_field(&record.password, &self.key)?;

        debug!("session restored");
        Ok(Credentials {
            email: email.to_string(),
            password,
        })
    }

    /// Delete the record. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        debug!(path = %self.path.display(), "session cleared");
        Ok(true)
    }
}
