//! # Order Data Transfer Objects
//!
//! An order moves through DRAFT → PENDING → ACCEPTED → DELIVERED, or is
//! CANCELLED along the way. Money fields are `Decimal`; the displayed total
//! is `items_cost + reward + service fee` (see [`crate::utils::order_total`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Created but not yet submitted for picker matching
    Draft,
    /// Finalized, visible to pickers
    Pending,
    /// A picker has committed to deliver
    Accepted,
    /// Picker marked the delivery done
    Delivered,
    Cancelled,
}

/// A single requested item on an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl OrderItem {
    /// Line cost: unit price times quantity
    pub fn line_cost(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A delivery request owned by one orderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub orderer_id: i64,
    /// Assigned once the order is accepted; at most one picker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker_id: Option<i64>,
    pub origin_city: String,
    pub destination_city: String,
    pub reward: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: String,
}

impl Order {
    pub fn items_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all item line costs
    pub fn items_cost(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_cost).sum()
    }

    /// Items cost + reward + service fee
    pub fn total_cost(&self) -> Decimal {
        crate::utils::order_total(self.items_cost(), self.reward)
    }
}

/// Order creation request. `picker_id` set for direct-to-picker orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub origin_city: String,
    pub destination_city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker_id: Option<i64>,
}

/// Add-item request (the JSON part of the multipart body; images are
/// attached as separate parts)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddItemRequest {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Reward update request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetRewardRequest {
    pub reward: Decimal,
}

/// Paged list of orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn watch_order() -> Order {
        Order {
            id: 7,
            orderer_id: 1,
            picker_id: None,
            origin_city: "Madrid".to_string(),
            destination_city: "Paris".to_string(),
            reward: dec!(25),
            status: OrderStatus::Pending,
            items: vec![OrderItem {
                id: 1,
                name: "Watch".to_string(),
                price: dec!(50),
                quantity: 1,
                image_urls: vec![],
            }],
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_order_cost_breakdown() {
        let order = watch_order();
        assert_eq!(order.items_count(), 1);
        assert_eq!(order.items_cost(), dec!(50));
        // 50 + 25 + 1.5% of 75
        assert_eq!(order.total_cost(), dec!(76.125));
    }

    #[test]
    fn test_line_cost_respects_quantity() {
        let item = OrderItem {
            id: 2,
            name: "Chocolate".to_string(),
            price: dec!(4.50),
            quantity: 3,
            image_urls: vec![],
        };
        assert_eq!(item.line_cost(), dec!(13.50));
    }

    #[test]
    fn test_order_deserializes_without_items() {
        // List endpoints omit items; `#[serde(default)]` keeps that lenient
        let json = r#"{
            "id": 1, "orderer_id": 2,
            "origin_city": "Madrid", "destination_city": "Paris",
            "reward": "25", "status": "DRAFT",
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items_count(), 0);
        assert_eq!(order.status, OrderStatus::Draft);
    }
}
