//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the catalog discovery engine, providing
//! structured error types shared by every component.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from engine components and the CLI driver
//! - **Output**: Structured error types with field-level context
//! - **Error Categories**: Validation, Configuration, Serialization, I/O
//!
//! ## Usage
//! ```rust
//! use catalog_discovery::errors::{Result, CatalogError};
//!
//! fn check_page(page: usize) -> Result<()> {
//!     if page < 1 {
//!         return Err(CatalogError::ValidationFailed {
//!             field: "page".to_string(),
//!             reason: "Page numbers start at 1".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error types for the catalog discovery engine
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller supplied an invalid value (bad coordinates, page below 1,
    /// unknown enum token, inverted date range)
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CatalogError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::ValidationFailed { .. } => "validation",
            CatalogError::Config { .. } => "configuration",
            CatalogError::Json(_) => "serialization",
            CatalogError::Io(_) => "io",
            CatalogError::Internal { .. } => "internal",
        }
    }

    /// Short machine-readable code for API error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CatalogError::Config { .. } => "CONFIG_ERROR",
            CatalogError::Json(_) => "SERIALIZATION_ERROR",
            CatalogError::Io(_) => "IO_ERROR",
            CatalogError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

// Helper macros for common error patterns
#[macro_export]
macro_rules! validation_error {
    ($field:expr, $reason:expr) => {
        $crate::errors::CatalogError::ValidationFailed {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
    ($field:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::errors::CatalogError::ValidationFailed {
            field: $field.to_string(),
            reason: format!($fmt, $($arg)*),
        }
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::errors::CatalogError::Internal {
            message: $msg.to_string(),
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::errors::CatalogError::Internal {
            message: format!($fmt, $($arg)*),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let err = CatalogError::ValidationFailed {
            field: "page".to_string(),
            reason: "below 1".to_string(),
        };
        assert_eq!(err.category(), "validation");
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_validation_error_macro() {
        let err = validation_error!("limit", "must be at least 1, got {}", 0);
        match err {
            CatalogError::ValidationFailed { field, reason } => {
                assert_eq!(field, "limit");
                assert_eq!(reason, "must be at least 1, got 0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
