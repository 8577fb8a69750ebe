//! System clipboard.
//!
//! On X11 the copied text is owned by this process and is only kept after
//! exit when a clipboard manager is running.

use tracing::debug;

use crate::error::Result;

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    debug!(len = text.len(), "copied to clipboard");
    Ok(())
}
