//! # Action Handlers
//!
//! One module per screen area. Handlers validate input, record inline
//! errors in state, and spawn the API call; results come back as
//! [`AppEvent`]s.
//!
//! [`AppEvent`]: crate::app::events::AppEvent

pub(crate) mod auth;
pub(crate) mod chat;
pub(crate) mod locations;
pub(crate) mod navigation;
pub(crate) mod offers;
pub(crate) mod orders;
pub(crate) mod profile;
pub(crate) mod search;
