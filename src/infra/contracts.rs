use anyhow::Result;

use crate::infra::config::AppConfig;

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig>;
}

/// Destination for "copy id" in the chat browser.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}
