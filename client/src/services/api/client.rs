//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every domain module funnels through the helpers here, which attach the
//! bearer token from the session store, issue the request, and normalize
//! failures into [`ApiError`]. A 401 anywhere expires the session and emits
//! [`AppEvent::SessionExpired`] exactly once per expiry.

use crate::app::events::AppEvent;
use crate::core::error::ApiError;
use crate::services::session::SessionStore;
use async_channel::Sender;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Default base URL for the backend API server
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// HTTP client for communicating with the JetPicks backend.
///
/// Maintains a connection pool; exactly one instance exists per app and is
/// shared behind an `Arc`.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: Arc<SessionStore>,
    events: Sender<AppEvent>,
}

impl ApiClient {
    /// Create a client with the base URL from `JETPICKS_API_URL`, falling
    /// back to the compiled-in default.
    ///
    /// The client is configured with a 10 second timeout to keep callers
    /// from hanging on a dead backend.
    pub fn new(session: Arc<SessionStore>, events: Sender<AppEvent>) -> Self {
        let base_url =
            std::env::var("JETPICKS_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::with_base_url(base_url, session, events)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        events: Sender<AppEvent>,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            session,
            events,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when a session exists
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.authorize(self.client.get(self.url(path)));
        self.execute(req).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.client.get(self.url(path)).query(query));
        self.execute(req).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.client.post(self.url(path)).json(body));
        self.execute(req).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.client.put(self.url(path)).json(body));
        self.execute(req).await
    }

    /// PUT with an empty body, used by status-transition endpoints
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.authorize(self.client.put(self.url(path)));
        self.execute(req).await
    }

    /// PUT with an empty body and no expected response payload
    pub(crate) async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        let req = self.authorize(self.client.put(self.url(path)));
        let response = self.send(req).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let req = self.authorize(self.client.delete(self.url(path)));
        let response = self.send(req).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.client.post(self.url(path)).multipart(form));
        self.execute(req).await
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        req.send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(req).await?;
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Normalize a non-success response. On 401 the stored session is
    /// expired and one `SessionExpired` event is emitted; concurrent 401s
    /// are deduplicated by the session store's transition guard.
    pub(crate) async fn error_from_response(&self, response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let error = normalize_error(status, &body);

        if matches!(error, ApiError::Unauthorized) && self.session.expire() {
            tracing::warn!("auth token rejected by backend, session cleared");
            let _ = self.events.try_send(AppEvent::SessionExpired);
        }

        error
    }
}

/// Map a status/body pair onto the error taxonomy
pub(crate) fn normalize_error(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(extract_message(body)),
        404 => ApiError::NotFound(extract_message(body)),
        422 => ApiError::Validation(first_validation_message(body)),
        status => ApiError::Server {
            status,
            message: extract_message(body),
        },
    }
}

/// Pull a human-readable message out of a `{"message": ...}` envelope,
/// falling back to the raw body
fn extract_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<shared::dto::auth::ErrorResponse>(body) {
        return envelope.message;
    }
    if body.trim().is_empty() {
        "unknown error".to_string()
    } else {
        body.trim().to_string()
    }
}

/// 422 body shape: `{"errors": {"field": ["msg", ...], ...}}`. The surfaced
/// message is the first message of the first field key in object iteration
/// order (serde_json is built with `preserve_order`, so that is wire order).
fn first_validation_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ValidationBody {
        errors: serde_json::Map<String, serde_json::Value>,
    }

    if let Ok(parsed) = serde_json::from_str::<ValidationBody>(body) {
        for (_field, messages) in parsed.errors.iter() {
            if let Some(first) = messages.as_array().and_then(|m| m.first()) {
                if let Some(text) = first.as_str() {
                    return text.to_string();
                }
            }
        }
    }
    extract_message(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::auth::{AuthResponse, Role, UserProfile};

    fn logged_in_session(tag: &str) -> Arc<SessionStore> {
        let path = std::env::temp_dir().join(format!(
            "jetpicks-client-test-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let session = Arc::new(SessionStore::load(path));
        session.store(&AuthResponse {
            user: UserProfile {
                id: 1,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                roles: vec![Role::Orderer],
                phone: None,
                avatar_url: None,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
            token: "token-abc".to_string(),
        });
        session
    }

    fn response_with(status: u16, body: &str) -> Response {
        let http_response = http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap();
        Response::from(http_response)
    }

    #[test]
    fn test_normalize_error_taxonomy() {
        assert_eq!(normalize_error(401, ""), ApiError::Unauthorized);
        assert_eq!(
            normalize_error(403, r#"{"message":"not yours"}"#),
            ApiError::Forbidden("not yours".to_string())
        );
        assert_eq!(
            normalize_error(404, r#"{"message":"no such order"}"#),
            ApiError::NotFound("no such order".to_string())
        );
        assert_eq!(
            normalize_error(500, r#"{"message":"boom"}"#),
            ApiError::Server { status: 500, message: "boom".to_string() }
        );
        assert_eq!(
            normalize_error(503, ""),
            ApiError::Server { status: 503, message: "unknown error".to_string() }
        );
    }

    #[test]
    fn test_validation_message_is_first_field_first_message() {
        // reward appears first on the wire despite sorting after the city
        // fields alphabetically, so its first message must win
        let body = r#"{"errors":{
            "reward":["Reward must be positive","Reward is required"],
            "destination_city":["Destination is required"],
            "origin_city":["Origin is required"]
        }}"#;
        assert_eq!(
            normalize_error(422, body),
            ApiError::Validation("Reward must be positive".to_string())
        );
    }

    #[test]
    fn test_validation_message_falls_back_on_malformed_body() {
        assert_eq!(
            normalize_error(422, r#"{"message":"unprocessable"}"#),
            ApiError::Validation("unprocessable".to_string())
        );
    }

    #[tokio::test]
    async fn test_401_expires_session_exactly_once() {
        let session = logged_in_session("401-once");
        let (tx, rx) = async_channel::unbounded();
        let api = ApiClient::with_base_url("http://127.0.0.1:0", session.clone(), tx);

        let first = api.error_from_response(response_with(401, "")).await;
        let second = api.error_from_response(response_with(401, "")).await;

        assert_eq!(first, ApiError::Unauthorized);
        assert_eq!(second, ApiError::Unauthorized);
        assert!(!session.is_authenticated());

        // Exactly one SessionExpired despite two failed calls
        assert!(matches!(rx.try_recv(), Ok(AppEvent::SessionExpired)));
        assert!(rx.try_recv().is_err());

        let _ = std::fs::remove_file(session.path());
    }

    #[tokio::test]
    async fn test_non_401_does_not_touch_session() {
        let session = logged_in_session("500-keep");
        let (tx, rx) = async_channel::unbounded();
        let api = ApiClient::with_base_url("http://127.0.0.1:0", session.clone(), tx);

        let err = api
            .error_from_response(response_with(500, r#"{"message":"boom"}"#))
            .await;
        assert_eq!(err.status(), Some(500));
        assert!(session.is_authenticated());
        assert!(rx.try_recv().is_err());

        let _ = std::fs::remove_file(session.path());
    }
}
