//! Fetches recent bot updates and groups them by chat and forum topic.

use thiserror::Error;

use crate::domain::{chat::GroupedChats, update::UpdateRecord};

use super::contracts::BotApiError;

pub const FETCH_FAILED_FALLBACK: &str = "Failed to fetch updates";
pub const NO_RECENT_CHATS_MESSAGE: &str =
    "No recent chats found. Try sending a message to your bot first.";

pub trait UpdatesSource {
    fn get_updates(&self, token: &str) -> Result<Vec<UpdateRecord>, BotApiError>;
}

impl<T: UpdatesSource + ?Sized> UpdatesSource for &T {
    fn get_updates(&self, token: &str) -> Result<Vec<UpdateRecord>, BotApiError> {
        (*self).get_updates(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchChatsError {
    #[error("Please enter a bot token")]
    MissingToken,
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Transport(String),
}

/// Groups updates by chat id. Updates without a message or chat are
/// skipped; chat metadata is taken from the first update seen for a chat,
/// while topics accumulate across all of them.
pub fn group_updates(updates: &[UpdateRecord]) -> GroupedChats {
    let mut grouped = GroupedChats::default();

    for message in updates.iter().filter_map(|update| update.message.as_ref()) {
        let Some(chat) = &message.chat else {
            continue;
        };

        let group = grouped.entry_or_seed(chat);

        if !message.is_topic_message {
            continue;
        }

        // Thread id 0 never names a real topic.
        if let Some(thread_id) = message.thread_id.filter(|id| *id != 0) {
            group.record_topic(thread_id, message.created_topic_name.clone());
        }
    }

    grouped
}

/// Fetches updates for `token` and groups them. An empty result is not an
/// error; callers show [`NO_RECENT_CHATS_MESSAGE`] for it.
pub fn fetch_grouped_chats(
    source: &dyn UpdatesSource,
    token: &str,
) -> Result<GroupedChats, FetchChatsError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(FetchChatsError::MissingToken);
    }

    let updates = source.get_updates(token).map_err(map_source_error)?;
    let grouped = group_updates(&updates);

    tracing::info!(
        updates = updates.len(),
        chats = grouped.len(),
        "grouped bot updates"
    );

    Ok(grouped)
}

fn map_source_error(error: BotApiError) -> FetchChatsError {
    let message = error.message_or(FETCH_FAILED_FALLBACK);
    match error {
        BotApiError::Api { .. } => FetchChatsError::Api(message),
        BotApiError::Transport { .. } => FetchChatsError::Transport(message),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::{
        chat::{ChatKind, ChatRef},
        update::MessageRecord,
    };

    struct StubSource {
        result: Result<Vec<UpdateRecord>, BotApiError>,
        captured_token: RefCell<Option<String>>,
    }

    impl StubSource {
        fn with_result(result: Result<Vec<UpdateRecord>, BotApiError>) -> Self {
            Self {
                result,
                captured_token: RefCell::new(None),
            }
        }
    }

    impl UpdatesSource for StubSource {
        fn get_updates(&self, token: &str) -> Result<Vec<UpdateRecord>, BotApiError> {
            *self.captured_token.borrow_mut() = Some(token.to_owned());
            self.result.clone()
        }
    }

    fn chat(id: i64, title: &str) -> ChatRef {
        ChatRef {
            id,
            kind: ChatKind::Supergroup,
            title: Some(title.to_owned()),
            ..ChatRef::default()
        }
    }

    fn plain(chat: ChatRef) -> UpdateRecord {
        UpdateRecord {
            message: Some(MessageRecord {
                chat: Some(chat),
                ..MessageRecord::default()
            }),
        }
    }

    fn topic(chat: ChatRef, thread_id: i64, created_name: Option<&str>) -> UpdateRecord {
        UpdateRecord {
            message: Some(MessageRecord {
                chat: Some(chat),
                thread_id: Some(thread_id),
                is_topic_message: true,
                created_topic_name: created_name.map(ToOwned::to_owned),
            }),
        }
    }

    #[test]
    fn skips_updates_without_message_or_chat() {
        let updates = vec![
            UpdateRecord { message: None },
            UpdateRecord {
                message: Some(MessageRecord::default()),
            },
            plain(chat(-1, "Team")),
        ];

        let grouped = group_updates(&updates);

        assert_eq!(grouped.len(), 1);
        assert!(grouped.get("-1").is_some());
    }

    #[test]
    fn first_seen_chat_metadata_wins_and_topics_accumulate() {
        let updates = vec![
            topic(chat(-1, "Old title"), 3, Some("Ops")),
            topic(chat(-1, "New title"), 5, Some("Dev")),
        ];

        let grouped = group_updates(&updates);
        let group = grouped.get("-1").expect("chat must be grouped");

        assert_eq!(group.chat().display_name(), "Old title");
        assert_eq!(group.topic_count(), 2);
        assert_eq!(
            group.topic(5).and_then(|topic| topic.name),
            Some("Dev".to_owned())
        );
    }

    #[test]
    fn topic_seen_without_creation_event_is_unnamed() {
        let grouped = group_updates(&[topic(chat(-1, "Forum"), 9, None)]);
        let topic = grouped
            .get("-1")
            .and_then(|group| group.topic(9))
            .expect("topic must be recorded");

        assert_eq!(topic.name, None);
        assert_eq!(topic.display_name(), "Unnamed Topic");
    }

    #[test]
    fn later_non_creation_message_overwrites_topic_name() {
        let updates = vec![
            topic(chat(-1, "Forum"), 9, Some("Ops")),
            topic(chat(-1, "Forum"), 9, None),
        ];

        let grouped = group_updates(&updates);

        assert_eq!(
            grouped
                .get("-1")
                .and_then(|group| group.topic(9))
                .and_then(|topic| topic.name),
            None
        );
    }

    #[test]
    fn thread_id_without_topic_flag_is_ignored() {
        let mut update = topic(chat(-1, "Group"), 4, None);
        if let Some(message) = update.message.as_mut() {
            message.is_topic_message = false;
        }

        let grouped = group_updates(&[update]);

        assert_eq!(grouped.get("-1").map(|group| group.topic_count()), Some(0));
    }

    #[test]
    fn chats_keep_first_seen_order() {
        let grouped = group_updates(&[
            plain(chat(-3, "C")),
            plain(chat(42, "A")),
            plain(chat(-3, "C")),
        ]);

        let ids: Vec<_> = grouped.iter().map(|group| group.chat().id).collect();
        assert_eq!(ids, vec![-3, 42]);
    }

    #[test]
    fn missing_token_never_reaches_source() {
        let source = StubSource::with_result(Ok(vec![]));

        let error = fetch_grouped_chats(&source, "  ").expect_err("must fail");

        assert_eq!(error, FetchChatsError::MissingToken);
        assert_eq!(error.to_string(), "Please enter a bot token");
        assert!(source.captured_token.borrow().is_none());
    }

    #[test]
    fn passes_trimmed_token_to_source() {
        let source = StubSource::with_result(Ok(vec![]));

        let _ = fetch_grouped_chats(&source, " 123:abc ");

        assert_eq!(*source.captured_token.borrow(), Some("123:abc".to_owned()));
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let source = StubSource::with_result(Ok(vec![]));

        let grouped = fetch_grouped_chats(&source, "123:abc").expect("fetch should succeed");

        assert!(grouped.is_empty());
    }

    #[test]
    fn api_failure_surfaces_server_description() {
        let source = StubSource::with_result(Err(BotApiError::Api {
            description: Some("Unauthorized".to_owned()),
        }));

        let error = fetch_grouped_chats(&source, "123:abc").expect_err("must fail");

        assert_eq!(error.to_string(), "Unauthorized");
    }

    #[test]
    fn api_failure_without_description_uses_fallback() {
        let source = StubSource::with_result(Err(BotApiError::Api { description: None }));

        let error = fetch_grouped_chats(&source, "123:abc").expect_err("must fail");

        assert_eq!(error, FetchChatsError::Api(FETCH_FAILED_FALLBACK.to_owned()));
    }

    #[test]
    fn transport_failure_surfaces_native_message() {
        let source = StubSource::with_result(Err(BotApiError::Transport {
            message: Some("connection refused".to_owned()),
        }));

        let error = fetch_grouped_chats(&source, "123:abc").expect_err("must fail");

        assert_eq!(
            error,
            FetchChatsError::Transport("connection refused".to_owned())
        );
    }
}
