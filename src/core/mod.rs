//! Core library components.
//!
//! Identity, encryption, storage and sharing logic. Nothing in here prints
//! or prompts; the CLI layer owns all terminal I/O.

pub mod alias;
pub mod auth;
pub mod categories;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod contacts;
pub mod domain;
pub mod identity;
pub mod machine;
pub mod session;
pub mod sharing;
pub mod stash;
pub mod store;
pub mod template;
pub mod types;
pub mod validation;
pub mod vault;
