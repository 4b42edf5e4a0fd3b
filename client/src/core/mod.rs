//! Core types shared across the engine: error taxonomy and the API seam.

pub mod error;
pub mod service;

pub use error::{ApiError, AppError, Result};
pub use service::ApiService;
