//! Contact commands.
//!
//! You can only share with users you have added here.

mod add;
mod list;
mod rm;

pub use add::execute as add;
pub use list::execute as list;
pub use rm::execute as rm;
