//! Bot API JSON shapes, limited to the fields this tool reads.

use serde::Deserialize;

use crate::domain::{
    chat::{ChatKind, ChatRef},
    update::{MessageRecord, UpdateRecord},
};

/// Envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireUpdate {
    #[serde(default)]
    pub message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub chat: Option<WireChat>,
    #[serde(default)]
    pub message_thread_id: Option<i64>,
    #[serde(default)]
    pub is_topic_message: Option<bool>,
    #[serde(default)]
    pub forum_topic_created: Option<WireForumTopicCreated>,
}

#[derive(Debug, Deserialize)]
pub struct WireChat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub chat_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireForumTopicCreated {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<WireUpdate> for UpdateRecord {
    fn from(update: WireUpdate) -> Self {
        Self {
            message: update.message.map(MessageRecord::from),
        }
    }
}

impl From<WireMessage> for MessageRecord {
    fn from(message: WireMessage) -> Self {
        Self {
            chat: message.chat.map(ChatRef::from),
            thread_id: message.message_thread_id,
            is_topic_message: message.is_topic_message.unwrap_or(false),
            created_topic_name: message.forum_topic_created.and_then(|topic| topic.name),
        }
    }
}

impl From<WireChat> for ChatRef {
    fn from(chat: WireChat) -> Self {
        Self {
            id: chat.id,
            kind: ChatKind::from_wire(&chat.chat_type),
            title: chat.title,
            username: chat.username,
            first_name: chat.first_name,
            last_name: chat.last_name,
        }
    }
}
