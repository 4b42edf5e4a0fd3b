//! # Background Tasks
//!
//! Polling loops and one-shot fetches spawned onto the tokio runtime.
//! Tasks never mutate domain state directly; they send [`AppEvent`]s
//! back to the owner, holding the state lock only for guard flags.
//!
//! [`AppEvent`]: crate::app::events::AppEvent

pub(crate) mod chat;
pub(crate) mod dashboard;
pub(crate) mod notifications;
pub(crate) mod profile;
