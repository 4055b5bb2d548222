//! Domain layer: core entities and business rules.

pub mod chat;
pub mod chat_browser_state;
pub mod compose_state;
pub mod events;
pub mod payload;
pub mod shell_state;
pub mod text_input_state;
pub mod update;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
