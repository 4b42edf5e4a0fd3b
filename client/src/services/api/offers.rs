//! # Offer Endpoints
//!
//! Reward negotiation: offer history per order, counter offer submission,
//! and offer resolution.

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::offers::{CounterOfferRequest, Offer, OffersPage};

impl ApiClient {
    pub async fn get_offers(&self, order_id: i64, page: u32) -> Result<OffersPage, ApiError> {
        self.get_json_query(&format!("/orders/{}/offers", order_id), &[("page", page)])
            .await
    }

    pub async fn submit_counter_offer(&self, req: &CounterOfferRequest) -> Result<Offer, ApiError> {
        self.post_json("/offers", req).await
    }

    pub async fn accept_offer(&self, offer_id: i64) -> Result<Offer, ApiError> {
        self.put_empty(&format!("/offers/{}/accept", offer_id)).await
    }

    pub async fn reject_offer(&self, offer_id: i64) -> Result<Offer, ApiError> {
        self.put_empty(&format!("/offers/{}/reject", offer_id)).await
    }
}
