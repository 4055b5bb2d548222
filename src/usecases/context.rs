use crate::{infra::config::AppConfig, telegram::BotApiClient};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub bot_api: BotApiClient,
}

impl AppContext {
    pub fn new(config: AppConfig, bot_api: BotApiClient) -> Self {
        Self { config, bot_api }
    }
}
