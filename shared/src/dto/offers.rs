//! # Offer Data Transfer Objects
//!
//! Reward negotiation records. The orderer's original reward is the INITIAL
//! offer; a picker's proposed alternative is a COUNTER offer. The backend
//! keeps at most one PENDING COUNTER offer per order at a time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OfferType {
    Initial,
    Counter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A negotiation record tied to an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Offer {
    pub id: i64,
    pub order_id: i64,
    pub picker_id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub status: OfferStatus,
    pub created_at: String,
}

impl Offer {
    /// Whether this record is an unresolved counter offer
    pub fn is_pending_counter(&self) -> bool {
        self.offer_type == OfferType::Counter && self.status == OfferStatus::Pending
    }
}

/// Counter offer submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterOfferRequest {
    pub order_id: i64,
    pub amount: Decimal,
}

/// Paged offer history for an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OffersPage {
    pub offers: Vec<Offer>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}
