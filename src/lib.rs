//! pnut - a shared, end-to-end encrypted stash for command line snippets.
//!
//! Items are encrypted with the owner's own age key before they leave the
//! machine. Sharing re-encrypts an item for the recipient's published key
//! and drops it in their inbox; their next listing imports it.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── account       # register, login, logout, reset, whoami, server
//! │   ├── items         # stash, list, pop, show, edit, rm
//! │   ├── browse        # Paged interactive listing
//! │   ├── share         # share, inbox
//! │   ├── users         # Contacts
//! │   ├── categories    # Category labels
//! │   ├── alias         # Alias bindings
//! │   ├── run           # alias run
//! │   ├── prompt        # dialoguer prompts
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── vault/        # Signed-in account façade used by every command
//!     ├── auth/         # Authenticator trait, REST and in-memory
//!     ├── store/        # DocumentStore trait, REST and in-memory
//!     ├── cipher/       # age payload encryption, session cache cipher
//!     ├── domain/       # Records and decrypted views
//!     ├── identity      # Keypair provisioning and lookup
//!     ├── session       # Local session cache
//!     ├── stash         # Encrypted items
//!     ├── sharing       # Inbox protocol
//!     ├── contacts      # Who you may share with
//!     ├── categories    # Label namespace
//!     ├── alias         # Name to item resolution
//!     └── template      # ${...} substitution
//! ```

pub mod cli;
pub mod core;
pub mod error;
