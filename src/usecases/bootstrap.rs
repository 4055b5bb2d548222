use std::{path::Path, sync::mpsc};

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    domain::shell_state::ShellState,
    infra::{
        self, clipboard::SystemClipboard, config::FileConfigAdapter, contracts::ConfigAdapter,
        error::AppError, storage_layout::StorageLayout,
    },
    telegram::{BotApiClient, ThreadedJobs},
    ui::CrosstermEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::DefaultShellOrchestrator,
    },
};

/// Everything the TUI loop drives.
pub struct ShellParts {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

/// Loads config, starts file logging and builds the Bot API client.
///
/// The returned guard flushes the log writer on drop; keep it alive for the
/// whole run.
pub fn bootstrap(config_path: Option<&Path>) -> Result<(AppContext, WorkerGuard), AppError> {
    let config = load_config(config_path)?;

    let layout = StorageLayout::resolve()?;
    let log_guard = infra::logging::init(&config.logging, &layout)?;

    let bot_api = BotApiClient::new(&config.telegram)?;
    tracing::info!(api_base_url = %config.telegram.api_base_url, "context ready");

    Ok((AppContext::new(config, bot_api), log_guard))
}

/// Wires the orchestrator to real jobs and the system clipboard. Job results
/// flow back to the event source over one channel.
pub fn compose_shell(context: &AppContext, initial_token: Option<&str>) -> ShellParts {
    let (events_tx, events_rx) = mpsc::channel();

    let state = initial_token
        .map(ShellState::with_token)
        .unwrap_or_default();
    let jobs = ThreadedJobs::new(context.bot_api.clone(), events_tx);

    ShellParts {
        event_source: Box::new(CrosstermEventSource::new(events_rx)),
        orchestrator: Box::new(DefaultShellOrchestrator::new(
            state,
            jobs,
            SystemClipboard::default(),
        )),
    }
}

fn load_config(config_path: Option<&Path>) -> Result<infra::config::AppConfig, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    config_adapter.load().map_err(AppError::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::AppConfig;

    #[test]
    fn loads_default_config_when_file_is_missing() {
        let config = load_config(Some(Path::new("./missing-config.toml")))
            .expect("config should load from defaults");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn compose_shell_prefills_token() {
        let config = AppConfig::default();
        let context = AppContext::new(
            config.clone(),
            BotApiClient::new(&config.telegram).expect("client should build"),
        );

        let parts = compose_shell(&context, Some("123:abc"));

        assert_eq!(parts.orchestrator.state().token().text(), "123:abc");
        assert!(parts.orchestrator.state().is_running());
    }
}
