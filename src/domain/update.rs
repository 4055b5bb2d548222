use super::chat::ChatRef;

/// A single polled update, reduced to the fields the grouper needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateRecord {
    pub message: Option<MessageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageRecord {
    pub chat: Option<ChatRef>,
    pub thread_id: Option<i64>,
    pub is_topic_message: bool,
    /// Name carried by a `forum_topic_created` service message.
    pub created_topic_name: Option<String>,
}
