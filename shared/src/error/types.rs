//! Error type carried across the core / application boundary

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The ordering core raises its own domain errors; this is the flattened form
/// handed to the surrounding application:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (budget overage, offending ids, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Whether the caller can recover by re-prompting (everything but 9xxx)
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.code.category(), super::category::ErrorCategory::System)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderEmpty);
        assert_eq!(err.code, ErrorCode::OrderEmpty);
        assert_eq!(err.message, "Cart is empty");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::OrderBudgetExceeded, "Over budget")
            .with_detail("excess", 50.0)
            .with_detail("cap", 100.0);

        let details = err.details.unwrap();
        assert_eq!(details.get("excess").unwrap(), 50.0);
        assert_eq!(details.get("cap").unwrap(), 100.0);
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::not_found("Table 5");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Table 5 not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        assert_eq!(AppError::validation("bad").code, ErrorCode::ValidationFailed);
        assert_eq!(AppError::internal("oops").code, ErrorCode::InternalError);
        assert_eq!(AppError::database("locked").code, ErrorCode::DatabaseError);
        assert_eq!(AppError::config("missing").code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_recoverable_split() {
        assert!(AppError::new(ErrorCode::OrderBudgetExceeded).is_recoverable());
        assert!(AppError::new(ErrorCode::TableNotFound).is_recoverable());
        assert!(!AppError::database("disk I/O error").is_recoverable());
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Order 42 not found");
        assert_eq!(format!("{}", err), "Order 42 not found");
    }
}
