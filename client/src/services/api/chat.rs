//! # Chat Endpoints
//!
//! Room lookup/creation is idempotent server-side: the same (order, picker)
//! pair always resolves to the same room.

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::chat::{
    ChatMessage, ChatRoom, ChatRoomsResponse, GetOrCreateRoomRequest, MessagesPage,
    SendMessageRequest,
};

impl ApiClient {
    pub async fn get_or_create_room(
        &self,
        req: &GetOrCreateRoomRequest,
    ) -> Result<ChatRoom, ApiError> {
        self.post_json("/chat-rooms/get-or-create", req).await
    }

    pub async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError> {
        let response: ChatRoomsResponse = self.get_json("/chat-rooms").await?;
        Ok(response.rooms)
    }

    /// Fetch one page of messages, in server (chronological) order
    pub async fn get_messages(
        &self,
        room_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<MessagesPage, ApiError> {
        self.get_json_query(
            &format!("/chat-rooms/{}/messages", room_id),
            &[("page", page), ("per_page", per_page)],
        )
        .await
    }

    pub async fn send_message(
        &self,
        room_id: i64,
        req: &SendMessageRequest,
    ) -> Result<ChatMessage, ApiError> {
        self.post_json(&format!("/chat-rooms/{}/messages", room_id), req)
            .await
    }

    /// Idempotent; re-marking a read message is a no-op server-side
    pub async fn mark_message_read(&self, message_id: i64) -> Result<(), ApiError> {
        self.put_unit(&format!("/chat-messages/{}/read", message_id))
            .await
    }
}
