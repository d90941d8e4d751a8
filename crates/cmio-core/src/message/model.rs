//! Message domain models.

use cmio_db::queries::messages::MessageRow;
use serde::{Deserialize, Serialize};

/// A staff message, optionally about one or more clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub message_type: MessageType,
    pub sender: String,
    pub channel: Option<String>,
    pub clients: Vec<String>,
    pub body: String,
    pub created_at: String,
}

impl Message {
    /// Create a Message from a database row.
    pub fn from_row(row: MessageRow) -> Self {
        Self {
            id: row.id,
            message_type: MessageType::from_str(&row.message_type),
            sender: row.sender_name,
            channel: row.channel_name,
            clients: row.client_names,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

/// Where a message was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Channel,
    Direct,
    SelfNote,
}

impl MessageType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "channel" => Self::Channel,
            "direct" => Self::Direct,
            _ => Self::SelfNote,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Direct => "direct",
            Self::SelfNote => "self_note",
        }
    }
}
