//! Chat endpoints: channels, direct messages, room history

use crate::client::Client;
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;

/// A chat room the user belongs to: a club channel or a direct
/// conversation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRoom {
    pub id: i64,
    pub name: Option<String>,
    pub avatar: Option<String>,
    /// `"channel"` or `"direct"`
    pub room_type: Option<String>,
    pub last_message: Option<String>,
    pub last_message_time: Option<NaiveDateTime>,
    pub last_message_time_text: Option<String>,
    pub unread_count: Option<i64>,
}

/// One message in a chat room.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessage {
    pub id: i64,
    pub room_id: Option<i64>,
    pub sender_id: Option<i64>,
    pub sender_name: Option<String>,
    pub sender_avatar: Option<String>,
    pub content: String,
    pub created_at: Option<NaiveDateTime>,
    pub time_text: Option<String>,
    pub is_me: Option<bool>,
}

/// Paging parameters for room history.
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
}

impl MessageQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        params
    }
}

impl Client {
    /// Fetch the club channels the user belongs to.
    pub async fn channels(&self) -> Result<Vec<ChatRoom>> {
        let data = self.get("/chat/channels", &[]).await?;
        Client::parse(data)
    }

    /// Fetch the user's direct conversations.
    pub async fn direct_messages(&self) -> Result<Vec<ChatRoom>> {
        let data = self.get("/chat/direct", &[]).await?;
        Client::parse(data)
    }

    /// Fetch a page of a room's message history.
    pub async fn chat_messages(
        &self,
        room_id: i64,
        query: &MessageQuery,
    ) -> Result<Vec<ChatMessage>> {
        let data = self
            .get(&format!("/chat/room/{}/messages", room_id), &query.params())
            .await?;
        Client::parse(data)
    }

    /// Send a message to a room.
    pub async fn send_message(&self, room_id: i64, content: &str) -> Result<ChatMessage> {
        let data = self
            .post(
                &format!("/chat/room/{}/send", room_id),
                Some(&json!({ "content": content })),
            )
            .await?;
        Client::parse(data)
    }
}
