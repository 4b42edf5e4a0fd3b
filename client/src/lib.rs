//! # JetPicks Client Engine
//!
//! Native client engine for the JetPicks marketplace, where **orderers**
//! request items delivered from abroad and **pickers** fulfill those orders
//! during their own trips. This crate owns everything below the rendering
//! layer: the HTTP client, persisted session, application state, and the
//! polling loops.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 client (this crate)                 │
//! ├─────────────────────────────────────────────────────┤
//! │  app/       - state, handlers, tasks, event loop    │
//! │  services/  - HTTP client + session persistence     │
//! │  core/      - error taxonomy, ApiService seam       │
//! │  tokio      - async runtime for spawned work        │
//! │  reqwest    - HTTP with bearer auth                 │
//! └─────────────────────────────────────────────────────┘
//!                        │ HTTP/JSON
//!                        ▼
//!              ┌───────────────────┐
//!              │  JetPicks backend │
//!              └───────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let _log_guard = client::logging::init();
//! let mut app = client::App::new();
//! app.start_background_polling();
//! loop {
//!     app.on_tick(); // apply queued events
//!     // render from app.state.read()
//! }
//! ```

pub mod app;
pub mod core;
pub mod logging;
pub mod services;
pub mod utils;

pub use app::{App, AppEvent, AppState, DashboardPayload, Screen};
pub use core::{ApiError, AppError, Result};
pub use services::{ApiClient, SessionStore};
