//! # Chat Data Transfer Objects
//!
//! One room exists per (order, picker) pair and is created lazily through an
//! idempotent get-or-create call. Message ids are unique and stable across
//! polls; the client deduplicates on them.

use serde::{Deserialize, Serialize};

/// Messaging channel scoped to one order and one orderer/picker pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: i64,
    pub order_id: i64,
    pub orderer_id: i64,
    pub picker_id: i64,
    pub unread_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<String>,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    /// Server-side translation of `content`, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    pub read: bool,
    pub created_at: String,
}

/// Idempotent room lookup/creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetOrCreateRoomRequest {
    pub order_id: i64,
    pub picker_id: i64,
}

/// Message send request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Paged messages for a room, in server (chronological) order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagesPage {
    pub messages: Vec<ChatMessage>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// Room list for the current user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRoomsResponse {
    pub rooms: Vec<ChatRoom>,
}
