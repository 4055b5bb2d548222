use anyhow::Result;

use crate::domain::{events::AppEvent, payload::OutboundPayload, shell_state::ShellState};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Runs network actions off the UI thread. Each call must eventually post
/// exactly one completion event back to the shell.
pub trait BackgroundJobs {
    fn fetch_updates(&self, token: String);
    fn dispatch(&self, token: String, payload: OutboundPayload);
}

/// Failure reported by a Bot API call, before it is turned into UI text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotApiError {
    /// The response carried `ok: false`.
    Api { description: Option<String> },
    /// The request did not complete or the body could not be read.
    Transport { message: Option<String> },
}

impl BotApiError {
    /// Server description or transport message, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        let detail = match self {
            Self::Api { description } => description.as_deref(),
            Self::Transport { message } => message.as_deref(),
        };

        detail
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(fallback)
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_or_prefers_server_description() {
        let error = BotApiError::Api {
            description: Some("Unauthorized".to_owned()),
        };

        assert_eq!(error.message_or("fallback"), "Unauthorized");
    }

    #[test]
    fn message_or_uses_fallback_when_detail_is_missing_or_blank() {
        let missing = BotApiError::Transport { message: None };
        let blank = BotApiError::Api {
            description: Some(" ".to_owned()),
        };

        assert_eq!(missing.message_or("fallback"), "fallback");
        assert_eq!(blank.message_or("fallback"), "fallback");
    }
}
