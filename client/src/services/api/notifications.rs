//! # Notification Endpoints
//!
//! The polling source for cross-role prompts. Mark-as-read is best-effort
//! at the call sites; errors are swallowed there, not here.

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::notifications::{Notification, NotificationsResponse, UnreadCountResponse};

impl ApiClient {
    pub async fn get_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let response: NotificationsResponse = self.get_json("/notifications").await?;
        Ok(response.notifications)
    }

    pub async fn get_unread_count(&self) -> Result<u32, ApiError> {
        let response: UnreadCountResponse = self.get_json("/notifications/unread-count").await?;
        Ok(response.count)
    }

    pub async fn mark_notification_read(&self, notification_id: i64) -> Result<(), ApiError> {
        self.put_unit(&format!("/notifications/{}/read", notification_id))
            .await
    }
}
