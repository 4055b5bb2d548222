use anyhow::Result;

use crate::infra::contracts::ClipboardSink;

/// Clipboard that remembers what was copied, or fails on demand.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    pub copied: Vec<String>,
    pub fail: bool,
}

impl ClipboardSink for RecordingClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("clipboard is not available");
        }

        self.copied.push(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_clipboard_keeps_copies_in_order() {
        let mut clipboard = RecordingClipboard::default();

        clipboard.copy("-100").expect("copy should succeed");
        clipboard.copy("7").expect("copy should succeed");

        assert_eq!(clipboard.copied, vec!["-100".to_owned(), "7".to_owned()]);
    }
}
