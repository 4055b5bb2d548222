mod adapter;
mod app_config;
mod file_config;
mod loader;

pub use adapter::FileConfigAdapter;
pub use app_config::{AppConfig, LogConfig, TelegramConfig, DEFAULT_API_BASE_URL};
pub use loader::load;
