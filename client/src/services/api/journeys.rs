//! # Travel Journey Endpoints

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::journeys::{CreateJourneyRequest, TravelJourney};

impl ApiClient {
    pub async fn list_journeys(&self) -> Result<Vec<TravelJourney>, ApiError> {
        self.get_json("/journeys").await
    }

    pub async fn create_journey(
        &self,
        req: &CreateJourneyRequest,
    ) -> Result<TravelJourney, ApiError> {
        self.post_json("/journeys", req).await
    }
}
