//! Use case for sending one test message into a chat or forum topic.
//!
//! A payload is validated first; only a valid payload produces exactly one
//! request through a [`SendGateway`]: `sendMessage` for text, `sendPhoto` for
//! image attachments and `sendDocument` for every other attachment.

use thiserror::Error;

use crate::domain::payload::{Attachment, DispatchMode, OutboundPayload, PayloadError};

use super::contracts::BotApiError;

pub const SEND_FAILED_FALLBACK: &str = "Failed to send message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest<'a> {
    pub chat_id: i64,
    pub topic_id: Option<i64>,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest<'a> {
    pub mode: DispatchMode,
    pub chat_id: i64,
    pub topic_id: Option<i64>,
    pub caption: Option<&'a str>,
    pub attachment: &'a Attachment,
}

/// Outbound side of the Bot API.
pub trait SendGateway {
    /// Issues `sendMessage`.
    fn send_text(&self, token: &str, request: &TextRequest<'_>) -> Result<(), BotApiError>;

    /// Issues `sendPhoto` or `sendDocument`, as selected by `request.mode`.
    fn send_file(&self, token: &str, request: &FileRequest<'_>) -> Result<(), BotApiError>;
}

impl<T: SendGateway + ?Sized> SendGateway for &T {
    fn send_text(&self, token: &str, request: &TextRequest<'_>) -> Result<(), BotApiError> {
        (*self).send_text(token, request)
    }

    fn send_file(&self, token: &str, request: &FileRequest<'_>) -> Result<(), BotApiError> {
        (*self).send_file(token, request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Please enter a bot token")]
    MissingToken,
    #[error("Enter a message or attach a file first")]
    EmptyPayload,
    #[error("File size must be less than 10MB")]
    AttachmentTooLarge,
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Transport(String),
}

impl From<PayloadError> for DispatchError {
    fn from(error: PayloadError) -> Self {
        match error {
            PayloadError::Empty => Self::EmptyPayload,
            PayloadError::AttachmentTooLarge { .. } => Self::AttachmentTooLarge,
        }
    }
}

/// Validates `payload` and sends it with the mode its attachment implies.
///
/// # Errors
/// Validation errors are returned without touching the gateway. Gateway
/// failures carry the server description or transport message, falling back
/// to [`SEND_FAILED_FALLBACK`].
pub fn dispatch_message(
    gateway: &dyn SendGateway,
    token: &str,
    payload: &OutboundPayload,
) -> Result<DispatchMode, DispatchError> {
    payload.validate()?;

    let token = token.trim();
    if token.is_empty() {
        return Err(DispatchError::MissingToken);
    }

    let mode = payload.mode();
    let target = payload.target;

    let result = match &payload.attachment {
        None => gateway.send_text(
            token,
            &TextRequest {
                chat_id: target.chat_id,
                topic_id: target.topic_id,
                text: payload.text().unwrap_or_default(),
            },
        ),
        Some(attachment) => gateway.send_file(
            token,
            &FileRequest {
                mode,
                chat_id: target.chat_id,
                topic_id: target.topic_id,
                caption: payload.text(),
                attachment,
            },
        ),
    };

    result.map_err(map_source_error)?;

    tracing::info!(
        chat_id = target.chat_id,
        topic_id = ?target.topic_id,
        method = mode.method(),
        "test message dispatched"
    );

    Ok(mode)
}

fn map_source_error(error: BotApiError) -> DispatchError {
    let message = error.message_or(SEND_FAILED_FALLBACK);
    match error {
        BotApiError::Api { .. } => DispatchError::Api(message),
        BotApiError::Transport { .. } => DispatchError::Transport(message),
    }
}
