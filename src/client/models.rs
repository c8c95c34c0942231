//! Result records returned by the collaborator.
//!
//! Each record renders itself as a [`Value`] object with the field names
//! exposed to tool callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::{ResultMap, Value};

/// Kind of chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    BasicGroup,
    Supergroup,
    Channel,
    Secret,
}

impl ChatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatKind::Private => "private",
            ChatKind::BasicGroup => "basic_group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
            ChatKind::Secret => "secret",
        }
    }

    /// Whether the chat has a member list that can be administered.
    pub fn is_group(self) -> bool {
        matches!(self, ChatKind::BasicGroup | ChatKind::Supergroup | ChatKind::Channel)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInfo {
    pub id: i64,
    pub title: String,
    pub kind: ChatKind,
    pub unread_count: i32,
    pub last_read_inbox_message_id: i64,
    pub last_read_outbox_message_id: i64,
    pub member_count: Option<i32>,
    pub last_message_date: Option<DateTime<Utc>>,
}

impl ChatInfo {
    /// Summary form used in chat lists.
    pub fn to_summary(&self) -> ResultMap {
        let mut map = ResultMap::new();
        map.insert("id".into(), Value::Int(self.id));
        map.insert("title".into(), Value::from(self.title.as_str()));
        map.insert("type".into(), Value::from(self.kind.as_str()));
        map.insert("unread_count".into(), Value::from(self.unread_count));
        if let Some(count) = self.member_count {
            map.insert("member_count".into(), Value::from(count));
        }
        if let Some(date) = self.last_message_date {
            map.insert("last_message_date".into(), Value::from(date.to_rfc3339()));
        }
        map
    }

    /// Detailed form returned for a single chat.
    pub fn to_value(&self) -> Value {
        let mut map = self.to_summary();
        map.insert(
            "last_read_inbox_message_id".into(),
            Value::Int(self.last_read_inbox_message_id),
        );
        map.insert(
            "last_read_outbox_message_id".into(),
            Value::Int(self.last_read_outbox_message_id),
        );
        Value::Object(map)
    }

    /// Minimal form used in public search results.
    pub fn to_search_hit(&self) -> Value {
        let mut map = ResultMap::new();
        map.insert("id".into(), Value::Int(self.id));
        map.insert("title".into(), Value::from(self.title.as_str()));
        map.insert("type".into(), Value::from(self.kind.as_str()));
        Value::Object(map)
    }
}

/// Author of a message or member of a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User(i64),
    Chat(i64),
}

/// Message content, reduced to what tool callers see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageBody {
    Text(String),
    Photo { caption: String },
    Video { caption: String },
    Document { caption: String, file_name: String },
    Sticker { emoji: String },
    VoiceNote,
    VideoNote,
    Animation { caption: String },
    Other,
}

impl MessageBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            MessageBody::Text(_) => "text",
            MessageBody::Photo { .. } => "photo",
            MessageBody::Video { .. } => "video",
            MessageBody::Document { .. } => "document",
            MessageBody::Sticker { .. } => "sticker",
            MessageBody::VoiceNote => "voice_note",
            MessageBody::VideoNote => "video_note",
            MessageBody::Animation { .. } => "animation",
            MessageBody::Other => "other",
        }
    }

    /// Searchable text of the message (text or caption).
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageBody::Text(text) => Some(text),
            MessageBody::Photo { caption }
            | MessageBody::Video { caption }
            | MessageBody::Document { caption, .. }
            | MessageBody::Animation { caption } => Some(caption),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: i64,
    pub chat_id: i64,
    pub sender: Sender,
    /// Unix timestamp
    pub date: i32,
    pub is_outgoing: bool,
    pub body: MessageBody,
}

impl MessageInfo {
    pub fn to_value(&self) -> Value {
        let mut map = ResultMap::new();
        map.insert("id".into(), Value::Int(self.id));
        map.insert("chat_id".into(), Value::Int(self.chat_id));
        map.insert("date".into(), Value::from(self.date));
        map.insert("is_outgoing".into(), Value::Bool(self.is_outgoing));
        match self.sender {
            Sender::User(id) => map.insert("sender_user_id".into(), Value::Int(id)),
            Sender::Chat(id) => map.insert("sender_chat_id".into(), Value::Int(id)),
        };

        map.insert("content_type".into(), Value::from(self.body.content_type()));
        match &self.body {
            MessageBody::Text(text) => {
                map.insert("text".into(), Value::from(text.as_str()));
            }
            MessageBody::Photo { caption }
            | MessageBody::Video { caption }
            | MessageBody::Animation { caption } => {
                map.insert("caption".into(), Value::from(caption.as_str()));
            }
            MessageBody::Document { caption, file_name } => {
                map.insert("caption".into(), Value::from(caption.as_str()));
                map.insert("file_name".into(), Value::from(file_name.as_str()));
            }
            MessageBody::Sticker { emoji } => {
                map.insert("emoji".into(), Value::from(emoji.as_str()));
            }
            MessageBody::VoiceNote | MessageBody::VideoNote | MessageBody::Other => {}
        }
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    /// Empty when hidden
    pub phone_number: String,
    pub is_bot: bool,
    pub is_premium: bool,
}

impl UserInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_value(&self) -> Value {
        let mut map = ResultMap::new();
        map.insert("id".into(), Value::Int(self.id));
        map.insert("first_name".into(), Value::from(self.first_name.as_str()));
        map.insert("last_name".into(), Value::from(self.last_name.as_str()));
        map.insert("is_premium".into(), Value::Bool(self.is_premium));
        map.insert("is_bot".into(), Value::Bool(self.is_bot));
        if let Some(username) = &self.username {
            map.insert("username".into(), Value::from(username.as_str()));
        }
        if !self.phone_number.is_empty() {
            map.insert("phone_number".into(), Value::from(self.phone_number.as_str()));
        }
        Value::Object(map)
    }
}

/// Status of a chat member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Creator,
    Administrator,
    Member,
    Restricted,
    Banned,
    Left,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberRole::Creator => "creator",
            MemberRole::Administrator => "administrator",
            MemberRole::Member => "member",
            MemberRole::Restricted => "restricted",
            MemberRole::Banned => "banned",
            MemberRole::Left => "left",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub member: Sender,
    pub role: MemberRole,
    /// Unix timestamp
    pub joined_date: i32,
}

impl MemberInfo {
    pub fn to_value(&self) -> Value {
        let mut map = ResultMap::new();
        match self.member {
            Sender::User(id) => map.insert("user_id".into(), Value::Int(id)),
            Sender::Chat(id) => map.insert("chat_id".into(), Value::Int(id)),
        };
        map.insert("role".into(), Value::from(self.role.as_str()));
        map.insert("joined_date".into(), Value::from(self.joined_date));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_fields_by_content_type() {
        let message = MessageInfo {
            id: 5,
            chat_id: -100,
            sender: Sender::Chat(-100),
            date: 1_700_000_000,
            is_outgoing: false,
            body: MessageBody::Document {
                caption: "report".into(),
                file_name: "q3.pdf".into(),
            },
        };
        assert_eq!(
            message.to_value().to_json(),
            json!({
                "id": 5,
                "chat_id": -100,
                "sender_chat_id": -100,
                "date": 1_700_000_000,
                "is_outgoing": false,
                "content_type": "document",
                "caption": "report",
                "file_name": "q3.pdf"
            })
        );
    }

    #[test]
    fn test_user_omits_hidden_fields() {
        let user = UserInfo {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: None,
            phone_number: String::new(),
            is_bot: false,
            is_premium: true,
        };
        assert_eq!(
            user.to_value().to_json(),
            json!({
                "id": 1,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "is_premium": true,
                "is_bot": false
            })
        );
    }

    #[test]
    fn test_chat_forms() {
        let chat = ChatInfo {
            id: 42,
            title: "Rustaceans".into(),
            kind: ChatKind::Channel,
            unread_count: 3,
            last_read_inbox_message_id: 10,
            last_read_outbox_message_id: 9,
            member_count: None,
            last_message_date: None,
        };
        assert_eq!(
            Value::Object(chat.to_summary()).to_json(),
            json!({"id": 42, "title": "Rustaceans", "type": "channel", "unread_count": 3})
        );
        assert_eq!(
            chat.to_search_hit().to_json(),
            json!({"id": 42, "title": "Rustaceans", "type": "channel"})
        );
        assert_eq!(
            chat.to_value().to_json()["last_read_outbox_message_id"],
            json!(9)
        );
    }

    #[test]
    fn test_member_value() {
        let member = MemberInfo {
            member: Sender::User(7),
            role: MemberRole::Administrator,
            joined_date: 100,
        };
        assert_eq!(
            member.to_value().to_json(),
            json!({"user_id": 7, "role": "administrator", "joined_date": 100})
        );
    }
}
