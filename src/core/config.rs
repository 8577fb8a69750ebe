//! Local configuration.
//!
//! Everything lives under one state directory (`$PNUT_HOME`, else `~/.pnut`):
//!
//! - `server.json`: which auth service and document store to talk to
//! - `config.toml`: client tunables (length limit, paging, retries)
//! - `session.json`: the cached session (see [`crate::core::session`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::core::store::RetryPolicy;
use crate::error::{ConfigError, Result};

/// Resolve the local state directory.
///
/// # Errors
///
/// Returns `ConfigError::NoHome` when no home directory can be found and
/// `PNUT_HOME` is unset.
pub fn home_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(constants::HOME_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(constants::HOME_DIR))
}

/// Create the state directory if missing.
pub fn ensure_home_dir() -> Result<PathBuf> {
    let dir = home_dir()?;
    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::WriteFile {
        path: dir.display().to_string(),
        source,
    })?;
    Ok(dir)
}

/// Endpoint record for the remote services.
///
/// Field names follow the web SDK config object so a project's exported
/// `firebase.json` can be used directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: Option<String>,
    #[serde(rename = "databaseURL")]
    pub database_url: String,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Base URL of a local auth emulator, e.g. `http://127.0.0.1:9099`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_emulator: Option<String>,
}

impl Default for ServerConfig {
    /// Local emulator suite.
    fn default() -> Self {
        Self {
            api_key: "demo-api-key".to_string(),
            auth_domain: None,
            database_url: "http://127.0.0.1:9000/?ns=demo-pnut".to_string(),
            project_id: Some("demo-pnut".to_string()),
            auth_emulator: Some("http://127.0.0.1:9099".to_string()),
        }
    }
}

impl ServerConfig {
    /// Path of `server.json`.
    pub fn path() -> Result<PathBuf> {
        Ok(home_dir()?.join(constants::SERVER_FILE))
    }

    /// Load the saved record, or the emulator defaults when none is saved.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            debug!("no server.json, using emulator defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Parse and validate a server record from any file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading server config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Persist as the active server.
    pub fn save(&self) -> Result<PathBuf> {
        self.validate()?;
        let path = ensure_home_dir()?.join(constants::SERVER_FILE);
        let contents = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::WriteFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }

    /// Forget the saved record; the emulator defaults apply again.
    pub fn reset() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "apiKey",
                reason: "empty".to_string(),
            }
            .into());
        }
        if !(self.database_url.starts_with("http://") || self.database_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "databaseURL",
                reason: format!("not an http(s) url: {}", self.database_url),
            }
            .into());
        }
        Ok(())
    }
}

/// Client tunables from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum item/note length in characters.
    pub max_text_length: usize,
    /// Items per page in interactive listings.
    pub page_size: usize,
    /// Extra attempts for transient store failures.
    pub retries: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_backoff_ms: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_text_length: constants::MAX_TEXT_LENGTH,
            page_size: constants::ITEMS_PER_PAGE,
            retries: 3,
            retry_backoff_ms: 200,
            timeout_secs: 15,
        }
    }
}

impl Settings {
    /// Load `config.toml`, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let path = home_dir()?.join(constants::SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str, origin: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject limits the cipher or terminal cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.max_text_length == 0 || self.max_text_length > constants::MAX_TEXT_CEILING {
            return Err(ConfigError::InvalidValue {
                field: "max_text_length",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    constants::MAX_TEXT_CEILING,
                    self.max_text_length
                ),
            }
            .into());
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff for the REST store.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_parses_sdk_shape() {
        let json = r#"{
            "apiKey": "AIza-test",
            "authDomain": "demo.firebaseapp.com",
            "databaseURL": "https://demo-default-rtdb.firebaseio.com",
            "projectId": "demo"
        }"#;
        let config: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_key, "AIza-test");
        assert_eq!(
            config.database_url,
            "https://demo-default-rtdb.firebaseio.com"
        );
        assert!(config.auth_emulator.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_config_rejects_bad_url() {
        let config = ServerConfig {
            database_url: "ftp://nope".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_server_is_emulator() {
        let config = ServerConfig::default();
        assert!(config.database_url.starts_with("http://127.0.0.1"));
        assert!(config.auth_emulator.is_some());
    }

    #[test]
    fn test_settings_defaults_when_empty() {
        let settings = Settings::parse("", "config.toml").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_text_length, 2048);
    }

    #[test]
    fn test_settings_partial_override() {
        let settings = Settings::parse("max_text_length = 512\nretries = 0\n", "t").unwrap();
        assert_eq!(settings.max_text_length, 512);
        assert_eq!(settings.retries, 0);
        assert_eq!(settings.page_size, constants::ITEMS_PER_PAGE);
    }

    #[test]
    fn test_settings_reject_over_ceiling() {
        assert!(Settings::parse("max_text_length = 5000", "t").is_err());
        assert!(Settings::parse("max_text_length = 0", "t").is_err());
        assert!(Settings::parse("page_size = 0", "t").is_err());
    }
}
