use anyhow::Result;

use crate::{
    domain::shell_state::ShellState,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
    },
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        bot_api = ?context.bot_api,
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;
    drive(event_source, orchestrator, |state| {
        terminal.draw(|frame| view::render(frame, state))
    })?;

    tracing::info!("TUI shell stopped");
    Ok(())
}

/// Renders and dispatches events until the orchestrator stops running or the
/// source runs dry.
fn drive<R>(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
    mut render: R,
) -> Result<()>
where
    R: FnMut(&ShellState) -> Result<()>,
{
    while orchestrator.state().is_running() {
        render(orchestrator.state())?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        domain::{
            events::{AppEvent, KeyInput},
            payload::OutboundPayload,
        },
        infra::stubs::RecordingClipboard,
        ui::event_source::MockEventSource,
        usecases::{contracts::BackgroundJobs, shell::DefaultShellOrchestrator},
    };

    #[derive(Default)]
    struct CountingJobs {
        fetches: RefCell<usize>,
    }

    impl BackgroundJobs for CountingJobs {
        fn fetch_updates(&self, _token: String) {
            *self.fetches.borrow_mut() += 1;
        }

        fn dispatch(&self, _token: String, _payload: OutboundPayload) {}
    }

    fn orchestrator() -> DefaultShellOrchestrator<CountingJobs, RecordingClipboard> {
        DefaultShellOrchestrator::new(
            ShellState::with_token("123:abc"),
            CountingJobs::default(),
            RecordingClipboard::default(),
        )
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }

    #[test]
    fn drive_renders_until_quit() {
        let mut source = MockEventSource::from(vec![
            AppEvent::Tick,
            AppEvent::InputKey(KeyInput::new("enter", false)),
            AppEvent::QuitRequested,
        ]);
        let mut orchestrator = orchestrator();
        let mut frames = 0;

        drive(&mut source, &mut orchestrator, |_| {
            frames += 1;
            Ok(())
        })
        .expect("loop should finish");

        assert_eq!(frames, 3);
        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn render_failure_stops_the_loop() {
        let mut source = MockEventSource::from(vec![AppEvent::Tick]);
        let mut orchestrator = orchestrator();

        let result = drive(&mut source, &mut orchestrator, |_| {
            anyhow::bail!("terminal gone")
        });

        assert!(result.is_err());
    }
}
