//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the JetPicks backend over REST.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, registration, profile, and error envelopes
//! - [`orders`] - Orders, items, and the order lifecycle
//! - [`offers`] - Reward negotiation (initial and counter offers)
//! - [`chat`] - Chat rooms and messages
//! - [`journeys`] - Picker travel journeys
//! - [`locations`] - Country/city reference data
//! - [`notifications`] - Polled notification records
//! - [`dashboard`] - Role-specific aggregate feeds
//! - [`search`] - Order and picker lookup
//!
//! ## Serialization Format
//!
//! All DTOs use `serde_json`:
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: omitted when `None` via
//!   `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: upper-case strings via `#[serde(rename_all = "UPPERCASE")]`
//!   or screaming-snake-case where the backend uses compound names

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod journeys;
pub mod locations;
pub mod notifications;
pub mod offers;
pub mod orders;
pub mod search;

pub use auth::*;
pub use chat::*;
pub use dashboard::*;
pub use journeys::*;
pub use locations::*;
pub use notifications::*;
pub use offers::*;
pub use orders::*;
pub use search::*;
