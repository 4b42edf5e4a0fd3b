//! Validation utilities for user input

use rust_decimal::Decimal;
use std::str::FromStr;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err("Invalid email format".to_string());
    }
    if parts[1].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email domain".to_string());
    }
    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if username.len() > 30 {
        return Err("Username must be less than 30 characters".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, _ and -".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

/// Parse and validate a positive money amount
pub fn validate_amount(input: &str) -> Result<Decimal, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Amount is required".to_string());
    }
    let amount =
        Decimal::from_str(trimmed).map_err(|_| format!("Invalid amount: {}", trimmed))?;
    if amount <= Decimal::ZERO {
        return Err("Amount must be greater than zero".to_string());
    }
    Ok(amount)
}
