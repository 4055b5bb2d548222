use std::{sync::mpsc::Sender, thread};

use crate::{
    domain::{events::AppEvent, payload::OutboundPayload},
    usecases::{
        contracts::BackgroundJobs, dispatch_message::dispatch_message,
        group_updates::fetch_grouped_chats,
    },
};

use super::bot_api::BotApiClient;

const JOB_SPAWN_FAILED: &str = "TELEGRAM_JOB_SPAWN_FAILED";
const JOB_RESULT_DROPPED: &str = "TELEGRAM_JOB_RESULT_DROPPED";

const FETCH_THREAD_NAME: &str = "tgids-fetch";
const SEND_THREAD_NAME: &str = "tgids-send";

/// Runs each Bot API action on its own short-lived thread and posts the
/// outcome back to the UI loop.
pub struct ThreadedJobs {
    client: BotApiClient,
    events: Sender<AppEvent>,
}

impl ThreadedJobs {
    pub fn new(client: BotApiClient, events: Sender<AppEvent>) -> Self {
        Self { client, events }
    }

    fn spawn<F>(&self, name: &'static str, job: F, on_spawn_failure: AppEvent)
    where
        F: FnOnce(&BotApiClient) -> AppEvent + Send + 'static,
    {
        let client = self.client.clone();
        let events = self.events.clone();

        let spawned = thread::Builder::new().name(name.to_owned()).spawn(move || {
            let event = job(&client);
            if events.send(event).is_err() {
                tracing::debug!(
                    code = JOB_RESULT_DROPPED,
                    job = name,
                    "ui loop is gone, dropping job result"
                );
            }
        });

        if let Err(error) = spawned {
            tracing::error!(
                code = JOB_SPAWN_FAILED,
                job = name,
                error = %error,
                "failed to spawn background job"
            );
            let _ = self.events.send(on_spawn_failure);
        }
    }
}

impl BackgroundJobs for ThreadedJobs {
    fn fetch_updates(&self, token: String) {
        self.spawn(
            FETCH_THREAD_NAME,
            move |client| {
                AppEvent::UpdatesFetched(
                    fetch_grouped_chats(client, &token).map_err(|error| error.to_string()),
                )
            },
            AppEvent::UpdatesFetched(Err("Could not start the fetch".to_owned())),
        );
    }

    fn dispatch(&self, token: String, payload: OutboundPayload) {
        let target = payload.target;
        self.spawn(
            SEND_THREAD_NAME,
            move |client| AppEvent::DispatchFinished {
                target,
                result: dispatch_message(client, &token, &payload)
                    .map_err(|error| error.to_string()),
            },
            AppEvent::DispatchFinished {
                target,
                result: Err("Could not start the send".to_owned()),
            },
        );
    }
}
