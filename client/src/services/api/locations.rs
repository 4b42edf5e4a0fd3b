//! # Location Reference Endpoints
//!
//! Countries and cities. The per-country cities cache lives in
//! [`crate::app::state::AppState`], not here; these calls always hit the
//! network.

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::locations::{City, Country, CreateCityRequest};

impl ApiClient {
    pub async fn get_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get_json("/locations/countries").await
    }

    pub async fn get_cities(&self, country_id: i64) -> Result<Vec<City>, ApiError> {
        self.get_json_query("/locations/cities", &[("country_id", country_id)])
            .await
    }

    /// Suggest a city missing from the reference data
    pub async fn create_city(&self, req: &CreateCityRequest) -> Result<City, ApiError> {
        self.post_json("/locations/cities", req).await
    }
}
