use std::collections::{BTreeMap, HashMap};

/// Label shown for forum topics whose creation event was never observed.
pub const UNNAMED_TOPIC_LABEL: &str = "Unnamed Topic";

/// Kind of Telegram chat as reported by the Bot API `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatKind {
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
    /// Any value the Bot API may add later; kept verbatim for display.
    Other(String),
}

impl ChatKind {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "private" => Self::Private,
            "group" => Self::Group,
            "supergroup" => Self::Supergroup,
            "channel" => Self::Channel,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_label(&self) -> &str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatRef {
    pub id: i64,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ChatRef {
    /// Title, then `@username`, then "first last"; empty when none is known.
    pub fn display_name(&self) -> String {
        if let Some(title) = non_empty(&self.title) {
            return title.to_owned();
        }

        if let Some(username) = non_empty(&self.username) {
            return format!("@{username}");
        }

        [non_empty(&self.first_name), non_empty(&self.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRef {
    pub thread_id: i64,
    pub name: Option<String>,
}

impl TopicRef {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_TOPIC_LABEL)
    }
}

/// One chat together with every forum topic observed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatGroup {
    chat: ChatRef,
    topics: BTreeMap<i64, Option<String>>,
}

impl ChatGroup {
    pub fn new(chat: ChatRef) -> Self {
        Self {
            chat,
            topics: BTreeMap::new(),
        }
    }

    pub fn chat(&self) -> &ChatRef {
        &self.chat
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn topic(&self, thread_id: i64) -> Option<TopicRef> {
        self.topics.get(&thread_id).map(|name| TopicRef {
            thread_id,
            name: name.clone(),
        })
    }

    /// Topics ordered by thread id.
    pub fn topics(&self) -> impl Iterator<Item = TopicRef> + '_ {
        self.topics.iter().map(|(thread_id, name)| TopicRef {
            thread_id: *thread_id,
            name: name.clone(),
        })
    }

    /// Records a topic, replacing any name stored for the same thread.
    pub fn record_topic(&mut self, thread_id: i64, name: Option<String>) {
        self.topics.insert(thread_id, name);
    }
}

/// Chats keyed by the string form of their id, iterated in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedChats {
    groups: Vec<ChatGroup>,
    index: HashMap<String, usize>,
}

impl GroupedChats {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, chat_key: &str) -> Option<&ChatGroup> {
        self.index.get(chat_key).map(|&position| &self.groups[position])
    }

    pub fn get_by_id(&self, chat_id: i64) -> Option<&ChatGroup> {
        self.get(&chat_id.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatGroup> {
        self.groups.iter()
    }

    /// Returns the group for `chat.id`, seeding it with `chat` only when the
    /// id has not been seen before.
    pub fn entry_or_seed(&mut self, chat: &ChatRef) -> &mut ChatGroup {
        let key = chat.id.to_string();
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                self.groups.push(ChatGroup::new(chat.clone()));
                let position = self.groups.len() - 1;
                self.index.insert(key, position);
                position
            }
        };

        &mut self.groups[position]
    }
}
