//! # Search Data Transfer Objects

use crate::dto::orders::Order;
use serde::{Deserialize, Serialize};

/// Query parameters for order search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSearchResponse {
    pub orders: Vec<Order>,
}

/// A picker as surfaced by search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerSearchResult {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub completed_deliveries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerSearchResponse {
    pub pickers: Vec<PickerSearchResult>,
}
