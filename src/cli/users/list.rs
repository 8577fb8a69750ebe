//! Users list command.

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

pub fn execute(json: bool) -> Result<()> {
    let vault = Vault::open()?;
    let users = vault.users()?;

    if json {
        return output::json(&serde_json::json!({
            "users": users,
            "count": users.len(),
        }));
    }
    if users.is_empty() {
        output::dimmed("no users added");
        output::hint("run: pnut users add <email>");
        return Ok(());
    }

    output::header(&format!("{} users", users.len()));
    output::rule();
    for user in &users {
        output::list_item(user);
    }
    Ok(())
}
