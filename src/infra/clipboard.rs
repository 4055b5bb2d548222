use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::infra::contracts::ClipboardSink;

/// System clipboard. The handle is opened lazily because some sessions (SSH,
/// bare TTY) have no clipboard, and that should only fail the copy action.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.handle.is_none() {
            self.handle = Some(Clipboard::new().context("clipboard is not available")?);
        }

        let Some(clipboard) = self.handle.as_mut() else {
            anyhow::bail!("clipboard is not available");
        };

        clipboard
            .set_text(text.to_owned())
            .context("failed to write to clipboard")
    }
}
