//! Error types.
//!
//! One top-level [`Error`] with a sub-enum per concern. Every fallible
//! function in the crate returns [`Result`].

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{field} is too long: {len} characters (max {max})")]
    Capacity {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("recipient not found: {0} (no account, or not in your users list)")]
    RecipientNotFound(String),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }
}

/// Credential and session failures. Fatal: the user must log in again.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("not logged in")]
    NoSession,

    #[error("session cache is corrupt: {0}")]
    CorruptSession(String),

    #[error("authentication rejected: {0}")]
    Rejected(String),

    #[error("email not verified: {0}")]
    EmailNotVerified(String),

    #[error("no keypair provisioned for {0}")]
    NotProvisioned(String),

    #[error("machine identifier unavailable: {0}")]
    MachineId(String),
}

/// Encryption and decryption failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("armor failed: {0}")]
    ArmorFailed(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Remote document store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Network(String),

    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("malformed record at {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("invalid store path: {0}")]
    InvalidPath(String),
}

impl StoreError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Network(_) => true,
            StoreError::Rejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Local configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHome,

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Input validation failures. Reported before any write.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("invalid alias name '{name}': {reason}")]
    InvalidAlias { name: String, reason: String },

    #[error("weak password: {0}")]
    WeakPassword(String),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("nothing to change: {0}")]
    NothingToChange(&'static str),

    #[error("file {path} has insecure permissions {actual} (expected {expected})")]
    InvalidPermissions {
        path: String,
        expected: String,
        actual: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
