use std::{error::Error as _, sync::Arc};

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use crate::{
    domain::update::UpdateRecord,
    infra::{config::TelegramConfig, error::AppError, secrets::redact_token},
    usecases::{
        contracts::BotApiError,
        dispatch_message::{FileRequest, SendGateway, TextRequest},
        group_updates::UpdatesSource,
    },
};

use super::wire::{ApiResponse, WireUpdate};

const BOT_API_REQUEST_FAILED: &str = "TELEGRAM_BOT_API_REQUEST_FAILED";
const BOT_API_REJECTED: &str = "TELEGRAM_BOT_API_REJECTED";

/// Blocking facade over the Telegram Bot HTTP API.
///
/// Every call blocks the current thread on a shared runtime, so callers on
/// the UI thread must go through the background job runner instead.
#[derive(Clone)]
pub struct BotApiClient {
    runtime: Arc<Runtime>,
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for BotApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BotApiClient {
    pub fn new(config: &TelegramConfig) -> Result<Self, AppError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tgids-http")
            .enable_all()
            .build()
            .map_err(AppError::RuntimeInit)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("tgids/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppError::HttpClientInit)?;

        Ok(Self {
            runtime: Arc::new(runtime),
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn method_url(&self, token: &str, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, token, method)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        token: &str,
        method: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, BotApiError> {
        tracing::debug!(method, "calling bot api");

        let outcome = self.runtime.block_on(async {
            let response = request.send().await?;
            response.json::<ApiResponse<T>>().await
        });

        let response = outcome.map_err(|error| {
            let message = redact_token(&transport_message(error), token);
            tracing::warn!(
                code = BOT_API_REQUEST_FAILED,
                method,
                error = %message,
                "bot api request failed"
            );
            BotApiError::Transport {
                message: Some(message),
            }
        })?;

        if !response.ok {
            tracing::warn!(
                code = BOT_API_REJECTED,
                method,
                description = response.description.as_deref().unwrap_or_default(),
                "bot api returned ok=false"
            );
            return Err(BotApiError::Api {
                description: response.description,
            });
        }

        Ok(response.result)
    }

    fn file_form(request: &FileRequest<'_>) -> Result<Form, BotApiError> {
        let field = request.mode.file_field().ok_or_else(|| BotApiError::Transport {
            message: Some(format!("{} does not upload files", request.mode.method())),
        })?;

        let part = Part::bytes(request.attachment.bytes.clone())
            .file_name(request.attachment.file_name.clone())
            .mime_str(&request.attachment.mime_type)
            .map_err(|error| BotApiError::Transport {
                message: Some(transport_message(error)),
            })?;

        let mut form = Form::new().text("chat_id", request.chat_id.to_string());
        if let Some(topic_id) = request.topic_id {
            form = form.text("message_thread_id", topic_id.to_string());
        }
        form = form.part(field, part);
        if let Some(caption) = request.caption {
            form = form.text("caption", caption.to_owned());
        }

        Ok(form)
    }
}

impl UpdatesSource for BotApiClient {
    fn get_updates(&self, token: &str) -> Result<Vec<UpdateRecord>, BotApiError> {
        let request = self.http.get(self.method_url(token, "getUpdates"));
        let updates: Option<Vec<WireUpdate>> = self.execute(token, "getUpdates", request)?;

        Ok(updates
            .unwrap_or_default()
            .into_iter()
            .map(UpdateRecord::from)
            .collect())
    }
}

impl SendGateway for BotApiClient {
    fn send_text(&self, token: &str, request: &TextRequest<'_>) -> Result<(), BotApiError> {
        let mut query = vec![
            ("chat_id", request.chat_id.to_string()),
            ("text", request.text.to_owned()),
        ];
        if let Some(topic_id) = request.topic_id {
            query.push(("message_thread_id", topic_id.to_string()));
        }

        let http_request = self
            .http
            .get(self.method_url(token, "sendMessage"))
            .query(&query);
        self.execute::<serde_json::Value>(token, "sendMessage", http_request)?;

        Ok(())
    }

    fn send_file(&self, token: &str, request: &FileRequest<'_>) -> Result<(), BotApiError> {
        let method = request.mode.method();
        let form = Self::file_form(request)?;

        let http_request = self
            .http
            .post(self.method_url(token, method))
            .multipart(form);
        self.execute::<serde_json::Value>(token, method, http_request)?;

        Ok(())
    }
}

/// Renders a reqwest error with its cause chain but without the request URL,
/// which embeds the bot token.
fn transport_message(error: reqwest::Error) -> String {
    let error = error.without_url();
    let mut message = error.to_string();

    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
