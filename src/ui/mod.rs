//! UI layer: rendering and interaction entry points (CLI/TUI).

mod compose_view;
mod event_source;
mod input_field;
pub mod shell;
mod styles;
mod terminal;
mod view;

pub(crate) use event_source::CrosstermEventSource;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
