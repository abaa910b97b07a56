//! Input validation helpers
//!
//! Validation runs at the view boundary before a payload reaches the
//! lifecycle engine; the engine itself does not re-validate.

use super::digits::is_numeric;
use super::error::{AppError, AppResult};

/// Validate that a required string is non-empty after trimming.
pub fn validate_required_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate that an already-normalized string is all ASCII digits.
pub fn validate_numeric(value: &str, field: &str) -> AppResult<()> {
    if !is_numeric(value) {
        return Err(AppError::validation(format!("{field} must be numeric")));
    }
    Ok(())
}

/// Parse a normalized count field into a non-negative integer.
pub fn parse_count(value: &str, field: &str) -> AppResult<u32> {
    validate_numeric(value, field)?;
    value
        .parse::<u32>()
        .map_err(|_| AppError::validation(format!("{field} is out of range")))
}
