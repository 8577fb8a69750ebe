//! Users rm command.

use tracing::info;

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

pub fn execute(email: &str) -> Result<()> {
    info!(email, "removing user");
    let vault = Vault::open()?;
    if vault.remove_user(email)? {
        output::success(&format!("removed {}", output::label(email)));
    } else {
        output::dimmed(&format!("{} was not in your users", email));
    }
    Ok(())
}
