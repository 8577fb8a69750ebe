//! Users add command.

use tracing::info;

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

pub fn execute(email: &str) -> Result<()> {
    info!(email, "adding user");
    let vault = Vault::open()?;
    vault.add_user(email)?;
    output::success(&format!("added {}", output::label(email)));
    Ok(())
}
