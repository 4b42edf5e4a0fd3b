//! Shared client utilities

pub mod time;
pub mod validation;
