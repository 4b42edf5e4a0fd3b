//! # Dashboard Aggregate Feeds

use crate::dto::journeys::TravelJourney;
use crate::dto::offers::Offer;
use crate::dto::orders::Order;
use serde::{Deserialize, Serialize};

/// Picker feed: orders available to fulfill plus the picker's own journeys
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerDashboard {
    pub available_orders: Vec<Order>,
    pub journeys: Vec<TravelJourney>,
}

/// Orderer feed: own orders plus offers awaiting a response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrdererDashboard {
    pub orders: Vec<Order>,
    pub pending_offers: Vec<Offer>,
}
