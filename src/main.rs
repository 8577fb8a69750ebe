//! pnut - a shared, end-to-end encrypted stash for command line snippets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pnut::cli::output;
use pnut::cli::{execute, Cli};
use pnut::error::{AuthError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("PNUT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("pnut=debug")
        } else {
            EnvFilter::new("pnut=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Auth(AuthError::NoSession | AuthError::CorruptSession(_)) => {
                Some("run: pnut login <email>")
            }
            Error::Auth(AuthError::EmailNotVerified(_)) => {
                Some("open the verification link mailed to you, then log in again")
            }
            Error::Auth(AuthError::NotProvisioned(_)) => Some("run: pnut login <email>"),
            Error::RecipientNotFound(_) => Some("run: pnut users add <email>"),
            Error::Clipboard(_) => Some("print it instead: pnut pop"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
