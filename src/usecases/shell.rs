use std::{path::Path, time::Instant};

use anyhow::Result;

use crate::{
    domain::{
        chat::GroupedChats,
        compose_state::{ComposeField, ComposeState, SENT_MESSAGE},
        events::{AppEvent, KeyInput},
        payload::{DispatchMode, DispatchTarget},
        shell_state::{ActivePane, Notice, ShellState},
    },
    infra::{attachment::load_attachment, contracts::ClipboardSink},
};

use super::{
    contracts::{BackgroundJobs, ShellOrchestrator},
    group_updates::NO_RECENT_CHATS_MESSAGE,
};

const CLIPBOARD_COPY_FAILED: &str = "UI_CLIPBOARD_COPY_FAILED";

const MISSING_TOKEN_MESSAGE: &str = "Please enter a bot token";

pub struct DefaultShellOrchestrator<J, C>
where
    J: BackgroundJobs,
    C: ClipboardSink,
{
    state: ShellState,
    jobs: J,
    clipboard: C,
}

impl<J, C> DefaultShellOrchestrator<J, C>
where
    J: BackgroundJobs,
    C: ClipboardSink,
{
    pub fn new(state: ShellState, jobs: J, clipboard: C) -> Self {
        Self {
            state,
            jobs,
            clipboard,
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if self
            .state
            .compose()
            .is_some_and(|compose| compose.should_close(now))
        {
            self.state.close_compose();
        }
    }

    fn on_key(&mut self, key: KeyInput) {
        if key.ctrl && key.key == "c" {
            self.state.stop();
            return;
        }

        if self.state.compose().is_some() {
            self.on_compose_key(&key);
            return;
        }

        match self.state.active_pane() {
            ActivePane::Token => self.on_token_key(&key),
            ActivePane::Browser => self.on_browser_key(&key),
        }
    }

    fn on_token_key(&mut self, key: &KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "enter" => self.start_fetch(),
            "tab" | "down" => self.state.set_active_pane(ActivePane::Browser),
            other => {
                self.state.token_mut().apply_key(other);
            }
        }
    }

    fn on_browser_key(&mut self, key: &KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "j" | "down" => self.state.browser_mut().select_next(),
            "k" | "up" => self.state.browser_mut().select_previous(),
            "enter" | " " => self.state.browser_mut().toggle_selected(),
            "s" => self.open_compose(),
            "y" => self.copy_selected_id(),
            "r" => self.start_fetch(),
            "tab" | "t" => self.state.set_active_pane(ActivePane::Token),
            "q" => self.state.stop(),
            _ => {}
        }
    }

    fn on_compose_key(&mut self, key: &KeyInput) {
        let Some(compose) = self.state.compose_mut() else {
            return;
        };

        if key.ctrl {
            if key.key == "d" {
                compose.clear_attachment();
            }
            return;
        }

        match key.key.as_str() {
            "esc" => self.state.close_compose(),
            "tab" | "backtab" => compose.toggle_focus(),
            "enter" => match compose.focus() {
                ComposeField::FilePath => attach_file(compose),
                ComposeField::Text => self.start_dispatch(),
            },
            other => {
                compose.focused_input_mut().apply_key(other);
            }
        }
    }

    fn start_fetch(&mut self) {
        if self.state.browser().fetch_state().is_in_flight() {
            return;
        }

        let token = self.state.token().text().trim().to_owned();
        if token.is_empty() {
            self.state.set_notice(Notice::error(MISSING_TOKEN_MESSAGE));
            return;
        }

        self.state.clear_notice();
        self.state.browser_mut().set_loading();
        self.jobs.fetch_updates(token);
    }

    fn start_dispatch(&mut self) {
        let token = self.state.token().text().trim().to_owned();
        let Some(payload) = self.state.compose_mut().and_then(ComposeState::begin_send) else {
            return;
        };

        self.jobs.dispatch(token, payload);
    }

    fn open_compose(&mut self) {
        if let Some(target) = self.state.browser().selected_target() {
            self.state.open_compose(ComposeState::new(target));
        }
    }

    fn copy_selected_id(&mut self) {
        let Some(id) = self.state.browser().selected_id() else {
            return;
        };

        let text = id.to_string();
        match self.clipboard.copy(&text) {
            Ok(()) => self
                .state
                .set_notice(Notice::info(format!("Copied {text} to clipboard"))),
            Err(error) => {
                tracing::warn!(code = CLIPBOARD_COPY_FAILED, error = %error, "copy failed");
                self.state
                    .set_notice(Notice::error(format!("Copy failed: {error}")));
            }
        }
    }

    fn on_updates_fetched(&mut self, result: Result<GroupedChats, String>) {
        match result {
            Ok(grouped) => {
                self.state.set_last_fetched_at(chrono::Local::now());
                if grouped.is_empty() {
                    self.state.set_notice(Notice::info(NO_RECENT_CHATS_MESSAGE));
                } else {
                    self.state.set_active_pane(ActivePane::Browser);
                }
                self.state.browser_mut().set_ready(grouped);
            }
            Err(message) => {
                self.state.browser_mut().set_failed(message.clone());
                self.state.set_notice(Notice::error(message));
            }
        }
    }

    fn on_dispatch_finished(
        &mut self,
        target: DispatchTarget,
        result: Result<DispatchMode, String>,
        now: Instant,
    ) {
        let awaiting = self.state.compose_mut().filter(|compose| {
            compose.is_sending()
                && compose.target().chat_id == target.chat_id
                && compose.target().topic_id == target.topic_id
        });

        match awaiting {
            Some(compose) => compose.finish_send(result, now),
            // The sending dialog is gone; never touch a newer one.
            None => match result {
                Ok(mode) => self
                    .state
                    .set_notice(Notice::info(format!("{SENT_MESSAGE} ({})", mode.as_label()))),
                Err(message) => self.state.set_notice(Notice::error(message)),
            },
        }
    }
}

fn attach_file(compose: &mut ComposeState) {
    let path = compose.file_path().text().trim().to_owned();
    let result = load_attachment(Path::new(&path)).map_err(|error| error.to_string());
    compose.set_attachment_result(result);
}

impl<J, C> ShellOrchestrator for DefaultShellOrchestrator<J, C>
where
    J: BackgroundJobs,
    C: ClipboardSink,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => self.on_tick(Instant::now()),
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.on_key(key),
            AppEvent::UpdatesFetched(result) => self.on_updates_fetched(result),
            AppEvent::DispatchFinished { target, result } => {
                self.on_dispatch_finished(target, result, Instant::now())
            }
        }

        Ok(())
    }
}
