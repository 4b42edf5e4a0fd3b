//! # Travel Journey Data Transfer Objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A picker's planned trip, matched against orders on the same city pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelJourney {
    pub id: i64,
    pub picker_id: i64,
    pub origin_city: String,
    pub destination_city: String,
    pub departure_date: String,
    pub arrival_date: String,
    /// Remaining carrying capacity in kilograms
    pub capacity_kg: Decimal,
}

/// Journey creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateJourneyRequest {
    pub origin_city: String,
    pub destination_city: String,
    pub departure_date: String,
    pub arrival_date: String,
    pub capacity_kg: Decimal,
}

impl TravelJourney {
    /// Whether this journey covers the given order route
    pub fn matches_route(&self, origin_city: &str, destination_city: &str) -> bool {
        self.origin_city == origin_city && self.destination_city == destination_city
    }
}
