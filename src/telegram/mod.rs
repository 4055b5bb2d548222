//! Telegram integration layer: Bot API client, wire types and job runner.

pub mod bot_api;
pub mod jobs;
mod wire;

pub use bot_api::BotApiClient;
pub use jobs::ThreadedJobs;

/// Returns the telegram module name for smoke checks.
pub fn module_name() -> &'static str {
    "telegram"
}
