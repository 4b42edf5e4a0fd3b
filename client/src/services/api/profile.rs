//! # Profile Endpoints
//!
//! Read/update the current user's profile; avatar upload is multipart.

use super::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::service::ImagePart;
use shared::dto::auth::{UpdateProfileRequest, UserProfile};

impl ApiClient {
    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/user/profile").await
    }

    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<UserProfile, ApiError> {
        self.put_json("/user/profile", req).await
    }

    /// Upload a new avatar image. The backend processes it asynchronously;
    /// callers poll the profile afterwards to pick up the final URL.
    pub async fn upload_avatar(&self, avatar: ImagePart) -> Result<UserProfile, ApiError> {
        let (filename, bytes) = avatar;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("avatar", part);
        self.post_multipart("/user/profile", form).await
    }
}
