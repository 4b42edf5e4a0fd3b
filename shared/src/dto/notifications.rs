//! # Notification Data Transfer Objects
//!
//! Notification records are the polling source for cross-role prompts:
//! an orderer learns a picker accepted their order, a picker learns an
//! orderer responded to a counter offer, and so on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    AcceptedOrder,
    CounterOffer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<i64>,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCountResponse {
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::AcceptedOrder).unwrap(),
            "\"ACCEPTED_ORDER\""
        );
        let kind: NotificationKind = serde_json::from_str("\"COUNTER_OFFER\"").unwrap();
        assert_eq!(kind, NotificationKind::CounterOffer);
    }
}
