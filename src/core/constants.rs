//! Constants used throughout pnut.
//!
//! Centralizes magic strings and configuration values.

/// Local state directory relative to HOME (~/.pnut).
pub const HOME_DIR: &str = ".pnut";

/// Environment variable overriding the local state directory.
pub const HOME_ENV: &str = "PNUT_HOME";

/// Cached session record inside the state directory.
pub const SESSION_FILE: &str = "session.json";

/// Server endpoint record inside the state directory.
pub const SERVER_FILE: &str = "server.json";

/// Tunables inside the state directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Default maximum item length, in characters.
pub const MAX_TEXT_LENGTH: usize = 2048;

/// Upper bound any configured maximum must respect (Linux terminal line limit).
pub const MAX_TEXT_CEILING: usize = 4096;

/// Items per page in interactive listings.
pub const ITEMS_PER_PAGE: usize = 10;

/// Category assigned when none is chosen.
pub const DEFAULT_CATEGORY: &str = "default";

/// Category assigned to items imported from the pending inbox.
pub const IMPORTED_CATEGORY: &str = "imported";

/// Number of characters of the hashed machine id used as session key.
pub const SESSION_KEY_LEN: usize = 32;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Collection names under a user's tree.
pub mod tree {
    pub const USERS: &str = "users";
    pub const PUBLIC: &str = "public";
    pub const PRIVATE: &str = "private";
    pub const PUBLIC_KEY: &str = "publicKey";
    pub const PRIVATE_KEY: &str = "privateKey";
    pub const PENDING: &str = "pending-text";
    pub const STASH: &str = "peanut-stash";
    pub const CATEGORIES: &str = "categories";
    pub const CONTACTS: &str = "contacts";
    pub const ALIASES: &str = "aliases";
    pub const ALIAS_INDEX_FIELD: &str = "name";
}
