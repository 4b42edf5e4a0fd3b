//! # Search Endpoints

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::orders::Order;
use shared::dto::search::{OrderSearchQuery, OrderSearchResponse, PickerSearchResponse, PickerSearchResult};

impl ApiClient {
    pub async fn search_orders(&self, query: &OrderSearchQuery) -> Result<Vec<Order>, ApiError> {
        let response: OrderSearchResponse = self.get_json_query("/search/orders", query).await?;
        Ok(response.orders)
    }

    pub async fn search_pickers(&self, query: &str) -> Result<Vec<PickerSearchResult>, ApiError> {
        let response: PickerSearchResponse = self
            .get_json_query("/search/pickers", &[("query", query)])
            .await?;
        Ok(response.pickers)
    }
}
