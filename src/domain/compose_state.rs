//! State of the "send test message" dialog.

use std::time::{Duration, Instant};

use super::{
    payload::{Attachment, DispatchMode, DispatchTarget, OutboundPayload},
    text_input_state::TextInputState,
};

/// How long the success confirmation stays up before the dialog closes.
pub const SUCCESS_DISMISS_DELAY: Duration = Duration::from_millis(1_500);

pub const SENT_MESSAGE: &str = "Message sent successfully!";

const FILE_PATH_MAX_LENGTH: usize = 1024;

/// Where a test message goes, with the names shown in the dialog header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeTarget {
    pub chat_id: i64,
    pub topic_id: Option<i64>,
    pub chat_name: String,
    pub topic_name: Option<String>,
}

impl ComposeTarget {
    pub fn dispatch_target(&self) -> DispatchTarget {
        DispatchTarget {
            chat_id: self.chat_id,
            topic_id: self.topic_id,
        }
    }
}

/// Lifecycle of the "send" action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Sending,
    Sent(DispatchMode),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Text,
    FilePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeState {
    target: ComposeTarget,
    text: TextInputState,
    file_path: TextInputState,
    attachment: Option<Attachment>,
    focus: ComposeField,
    dispatch_state: DispatchState,
    dismiss_at: Option<Instant>,
}

impl ComposeState {
    pub fn new(target: ComposeTarget) -> Self {
        Self {
            target,
            text: TextInputState::default(),
            file_path: TextInputState::with_max_length(FILE_PATH_MAX_LENGTH),
            attachment: None,
            focus: ComposeField::default(),
            dispatch_state: DispatchState::default(),
            dismiss_at: None,
        }
    }

    pub fn target(&self) -> &ComposeTarget {
        &self.target
    }

    pub fn text(&self) -> &TextInputState {
        &self.text
    }

    pub fn file_path(&self) -> &TextInputState {
        &self.file_path
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn focus(&self) -> ComposeField {
        self.focus
    }

    pub fn dispatch_state(&self) -> &DispatchState {
        &self.dispatch_state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.dispatch_state, DispatchState::Sending)
    }

    /// Send is allowed when idle-ish and there is text or a file to send.
    pub fn can_send(&self) -> bool {
        !self.is_sending() && (!self.text.is_blank() || self.attachment.is_some())
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ComposeField::Text => ComposeField::FilePath,
            ComposeField::FilePath => ComposeField::Text,
        };
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInputState {
        match self.focus {
            ComposeField::Text => &mut self.text,
            ComposeField::FilePath => &mut self.file_path,
        }
    }

    /// Stores the result of loading the file named in the path field.
    pub fn set_attachment_result(&mut self, result: Result<Attachment, String>) {
        match result {
            Ok(attachment) => {
                self.attachment = Some(attachment);
                self.file_path.clear();
                self.dispatch_state = DispatchState::Idle;
            }
            Err(message) => {
                self.dispatch_state = DispatchState::Failed(message);
            }
        }
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Moves to `Sending` and returns the payload, or `None` when sending is
    /// not currently allowed.
    pub fn begin_send(&mut self) -> Option<OutboundPayload> {
        if !self.can_send() {
            return None;
        }

        self.dispatch_state = DispatchState::Sending;

        let mut payload = OutboundPayload::new(self.target.dispatch_target());
        if !self.text.is_empty() {
            payload = payload.with_text(self.text.text());
        }
        if let Some(attachment) = &self.attachment {
            payload = payload.with_attachment(attachment.clone());
        }

        Some(payload)
    }

    /// Applies a dispatch outcome. Success clears the composed content and
    /// schedules the dialog to close; failure keeps everything for a retry.
    pub fn finish_send(&mut self, result: Result<DispatchMode, String>, now: Instant) {
        match result {
            Ok(mode) => {
                self.dispatch_state = DispatchState::Sent(mode);
                self.text.clear();
                self.file_path.clear();
                self.attachment = None;
                self.dismiss_at = Some(now + SUCCESS_DISMISS_DELAY);
            }
            Err(message) => {
                self.dispatch_state = DispatchState::Failed(message);
            }
        }
    }

    pub fn should_close(&self, now: Instant) -> bool {
        self.dismiss_at.is_some_and(|at| now >= at)
    }
}
