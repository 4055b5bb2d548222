use chrono::{DateTime, Local};

use super::{
    chat_browser_state::ChatBrowserState, compose_state::ComposeState,
    text_input_state::TextInputState,
};

/// Bot tokens are ~46 chars; leave room for pasted whitespace.
const TOKEN_MAX_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePane {
    #[default]
    Token,
    Browser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Banner line shown between the token bar and the chat browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    active_pane: ActivePane,
    token: TextInputState,
    browser: ChatBrowserState,
    compose: Option<ComposeState>,
    notice: Option<Notice>,
    last_fetched_at: Option<DateTime<Local>>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            active_pane: ActivePane::default(),
            token: TextInputState::with_max_length(TOKEN_MAX_LENGTH),
            browser: ChatBrowserState::default(),
            compose: None,
            notice: None,
            last_fetched_at: None,
        }
    }
}

impl ShellState {
    pub fn with_token(token: &str) -> Self {
        let mut state = Self::default();
        for ch in token.chars() {
            state.token.insert_char(ch);
        }
        state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn active_pane(&self) -> ActivePane {
        self.active_pane
    }

    pub fn set_active_pane(&mut self, pane: ActivePane) {
        self.active_pane = pane;
    }

    pub fn token(&self) -> &TextInputState {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut TextInputState {
        &mut self.token
    }

    pub fn browser(&self) -> &ChatBrowserState {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut ChatBrowserState {
        &mut self.browser
    }

    pub fn compose(&self) -> Option<&ComposeState> {
        self.compose.as_ref()
    }

    pub fn compose_mut(&mut self) -> Option<&mut ComposeState> {
        self.compose.as_mut()
    }

    pub fn open_compose(&mut self, compose: ComposeState) {
        self.compose = Some(compose);
    }

    pub fn close_compose(&mut self) {
        self.compose = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Local>> {
        self.last_fetched_at
    }

    pub fn set_last_fetched_at(&mut self, at: DateTime<Local>) {
        self.last_fetched_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_on_token_pane() {
        let state = ShellState::default();

        assert!(state.is_running());
        assert_eq!(state.active_pane(), ActivePane::Token);
        assert!(state.compose().is_none());
        assert!(state.last_fetched_at().is_none());
    }

    #[test]
    fn with_token_prefills_and_caps_length() {
        let state = ShellState::with_token("123:abc");
        assert_eq!(state.token().text(), "123:abc");

        let long = "x".repeat(TOKEN_MAX_LENGTH + 10);
        let capped = ShellState::with_token(&long);
        assert_eq!(capped.token().text().chars().count(), TOKEN_MAX_LENGTH);
    }

    #[test]
    fn notice_can_be_replaced_and_cleared() {
        let mut state = ShellState::default();

        state.set_notice(Notice::info("Copied 42 to clipboard"));
        state.set_notice(Notice::error("Unauthorized"));
        assert_eq!(state.notice().map(|notice| notice.kind), Some(NoticeKind::Error));

        state.clear_notice();
        assert!(state.notice().is_none());
    }
}
