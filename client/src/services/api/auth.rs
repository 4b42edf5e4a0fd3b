//! # Authentication Endpoints
//!
//! Credential exchange: login and registration.

use super::client::ApiClient;
use crate::core::error::ApiError;
use shared::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};

impl ApiClient {
    /// Login with email and password.
    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        tracing::info!("attempting login");
        let start = std::time::Instant::now();

        let result: Result<AuthResponse, ApiError> = self.post_json("/auth/login", req).await;

        match &result {
            Ok(_) => tracing::info!(duration_ms = start.elapsed().as_millis(), "login successful"),
            Err(e) => tracing::warn!(error = %e, "login failed"),
        }
        result
    }

    /// Register a new account with one or both roles.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", req).await
    }
}
