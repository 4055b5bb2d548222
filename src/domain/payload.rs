//! Outbound message payloads and their pre-flight rules.

use thiserror::Error;

/// Upload cap enforced before any request is issued (10 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

pub const ATTACHMENT_TOO_LARGE_MESSAGE: &str = "File size must be less than 10MB";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTarget {
    pub chat_id: i64,
    pub topic_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Size rendered the way the compose dialog shows it, e.g. `1.25 MB`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes() as f64 / 1024.0 / 1024.0)
    }
}

/// Which Bot API send method a payload maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Text,
    Photo,
    Document,
}

impl DispatchMode {
    pub fn method(self) -> &'static str {
        match self {
            Self::Text => "sendMessage",
            Self::Photo => "sendPhoto",
            Self::Document => "sendDocument",
        }
    }

    /// Multipart field holding the file for upload modes.
    pub fn file_field(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Photo => Some("photo"),
            Self::Document => Some("document"),
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Photo => "photo",
            Self::Document => "document",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Enter a message or attach a file first")]
    Empty,
    #[error("File size must be less than 10MB")]
    AttachmentTooLarge { size_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundPayload {
    pub target: DispatchTarget,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

impl OutboundPayload {
    pub fn new(target: DispatchTarget) -> Self {
        Self {
            target,
            text: None,
            attachment: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Text counts as present only when it has non-whitespace content.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.trim().is_empty())
    }

    pub fn has_content(&self) -> bool {
        self.text().is_some() || self.attachment.is_some()
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        if !self.has_content() {
            return Err(PayloadError::Empty);
        }

        if let Some(attachment) = &self.attachment {
            ensure_attachment_size(attachment.size_bytes())?;
        }

        Ok(())
    }

    pub fn mode(&self) -> DispatchMode {
        match &self.attachment {
            None => DispatchMode::Text,
            Some(attachment) if attachment.is_image() => DispatchMode::Photo,
            Some(_) => DispatchMode::Document,
        }
    }
}

pub fn ensure_attachment_size(size_bytes: u64) -> Result<(), PayloadError> {
    if size_bytes > MAX_ATTACHMENT_BYTES {
        return Err(PayloadError::AttachmentTooLarge { size_bytes });
    }

    Ok(())
}
