//! External integrations: the backend HTTP client and the persisted session.

pub mod api;
pub mod session;

pub use api::ApiClient;
pub use session::SessionStore;
