//! # Dashboard Endpoints
//!
//! Role-specific aggregate feeds. These are the expensive calls the TTL
//! cache in [`crate::app::state`] exists for.

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::dashboard::{OrdererDashboard, PickerDashboard};

impl ApiClient {
    pub async fn get_picker_dashboard(&self) -> Result<PickerDashboard, ApiError> {
        self.get_json("/dashboard/picker").await
    }

    pub async fn get_orderer_dashboard(&self) -> Result<OrdererDashboard, ApiError> {
        self.get_json("/dashboard/orderer").await
    }
}
