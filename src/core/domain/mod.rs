//! Domain types.

pub mod identity;
mod item;
mod label;
mod share;

pub use identity::{Identity, PrivateProfile, PublicProfile};
pub use item::{Item, ItemPatch, StashRecord, Undecryptable};
pub use label::{Alias, Category, NameRecord};
pub use share::PendingShare;
