use super::{
    chat::GroupedChats,
    payload::{DispatchMode, DispatchTarget},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    /// Result of a background `getUpdates` call; errors are user-facing text.
    UpdatesFetched(Result<GroupedChats, String>),
    /// Result of a background send to `target`; errors are user-facing text.
    DispatchFinished {
        target: DispatchTarget,
        result: Result<DispatchMode, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}
