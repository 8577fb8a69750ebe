//! CLI integration tests.
//!
//! Everything here runs without a server: commands either fail before the
//! network (no session, bad input) or only touch local state.

mod support;

#[path = "cli/errors.rs"]
mod errors;
#[path = "cli/input.rs"]
mod input;
#[path = "cli/server.rs"]
mod server;
#[path = "cli/session.rs"]
mod session;
