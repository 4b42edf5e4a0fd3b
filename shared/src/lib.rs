//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between the JetPicks client engine
//! and the backend REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects, one module per API area
//! - **[`utils`]**: Shared computation (service fee and order totals)
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** in Rust and on the wire
//! - Optional fields are omitted when `None`
//! - Status/role enums serialize as upper-case strings (`"PENDING"`,
//!   `"ORDERER"`), matching the backend enumeration values
//! - Money fields (item prices, rewards, fees) are `rust_decimal::Decimal`
//!   so fee arithmetic is exact

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
