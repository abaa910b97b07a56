//! Unified error handling
//!
//! Application-level error enum and result alias. Nothing here is fatal:
//! every failure degrades to "nothing changed, user informed".

use tracing::error;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business logic errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    // ========== Persistence errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper Constructors ==========

impl AppError {
    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a Conflict error
    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict(resource.into())
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an Invalid error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Create an invalid credentials error with unified message
    /// Used to prevent identity enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Invalid("Invalid identity or access code".to_string())
    }

    /// Log persistence-class errors; business errors stay quiet here
    pub fn trace(self) -> Self {
        match &self {
            Self::Io(e) => error!(target: "storage", error = %e, "I/O error occurred"),
            Self::Serialization(e) => {
                error!(target: "storage", error = %e, "Serialization error occurred")
            }
            _ => {}
        }
        self
    }
}
