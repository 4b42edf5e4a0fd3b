//! # Order Endpoints
//!
//! Order creation and lifecycle transitions. Item uploads are multipart so
//! image arrays ride along with the JSON payload.

use super::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::service::ImagePart;
use rust_decimal::Decimal;
use shared::dto::orders::{AddItemRequest, CreateOrderRequest, Order, OrdersPage, SetRewardRequest};

impl ApiClient {
    /// Create an order (DRAFT, or direct-to-picker when `picker_id` is set)
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.post_json("/orders", req).await
    }

    pub async fn get_order(&self, order_id: i64) -> Result<Order, ApiError> {
        self.get_json(&format!("/orders/{}", order_id)).await
    }

    pub async fn list_orders(&self, page: u32) -> Result<OrdersPage, ApiError> {
        self.get_json_query("/orders", &[("page", page)]).await
    }

    /// Add an item to a draft. The JSON payload goes in the `item` part;
    /// each image is a separate `images[]` part.
    pub async fn add_order_item(
        &self,
        order_id: i64,
        req: &AddItemRequest,
        images: Vec<ImagePart>,
    ) -> Result<Order, ApiError> {
        let payload =
            serde_json::to_string(req).map_err(|e| ApiError::Parse(e.to_string()))?;
        let mut form = reqwest::multipart::Form::new().text("item", payload);
        for (filename, bytes) in images {
            let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
            form = form.part("images[]", part);
        }
        self.post_multipart(&format!("/orders/{}/items", order_id), form)
            .await
    }

    pub async fn set_reward(&self, order_id: i64, reward: Decimal) -> Result<Order, ApiError> {
        self.put_json(
            &format!("/orders/{}/reward", order_id),
            &SetRewardRequest { reward },
        )
        .await
    }

    /// DRAFT → PENDING: submit the order for picker matching
    pub async fn finalize_order(&self, order_id: i64) -> Result<Order, ApiError> {
        self.put_empty(&format!("/orders/{}/finalize", order_id)).await
    }

    /// PENDING → ACCEPTED: the picker commits to deliver
    pub async fn accept_order(&self, order_id: i64) -> Result<Order, ApiError> {
        self.put_empty(&format!("/orders/{}/accept", order_id)).await
    }

    /// ACCEPTED → DELIVERED
    pub async fn confirm_delivery(&self, order_id: i64) -> Result<Order, ApiError> {
        self.put_empty(&format!("/orders/{}/confirm-delivery", order_id))
            .await
    }

    pub async fn cancel_order(&self, order_id: i64) -> Result<(), ApiError> {
        self.delete_unit(&format!("/orders/{}", order_id)).await
    }
}
