//! Custom error types for expense-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every controller operation returns an
//! [`ExpenseResult`], and [`ExpenseError::kind`] lets callers branch on the
//! class of failure instead of matching message text.

use thiserror::Error;

/// The main error type for expense-cli operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A form field is missing or malformed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found in the locally loaded list
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Transport failure (connect, timeout, undecodable body)
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// No usable session (not logged in, or expired)
    #[error("Session error: {0}")]
    Session(String),

    /// The same operation is already in flight
    #[error("Operation already in progress: {0}")]
    Busy(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

/// Coarse classification of an [`ExpenseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caught locally before any request
    Validation,
    /// Transport or server-status failure
    Request,
    /// Missing or expired credential
    Session,
    /// Rejected because an identical operation is pending
    Busy,
    /// Target id is not in the local list
    NotFound,
    /// Local environment (config, disk, terminal)
    Local,
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Request(_) | Self::Status { .. } => ErrorKind::Request,
            Self::Session(_) => ErrorKind::Session,
            Self::Busy(_) => ErrorKind::Busy,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Tui(_) => ErrorKind::Local,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ExpenseError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            },
            None if err.is_timeout() => Self::Request(format!("timed out: {}", err)),
            None => Self::Request(err.to_string()),
        }
    }
}

/// Result type alias for expense-cli operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Validation("All fields are required".into());
        assert_eq!(err.to_string(), "Validation error: All fields are required");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("42");
        assert_eq!(err.to_string(), "Expense not found: 42");
        assert!(err.is_not_found());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_status_error() {
        let err = ExpenseError::Status {
            status: 401,
            message: "Invalid token".into(),
        };
        assert_eq!(err.to_string(), "Server returned 401: Invalid token");
        assert_eq!(err.kind(), ErrorKind::Request);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ExpenseError::Request("refused".into()).kind(), ErrorKind::Request);
        assert_eq!(ExpenseError::Session("expired".into()).kind(), ErrorKind::Session);
        assert_eq!(ExpenseError::Busy("create".into()).kind(), ErrorKind::Busy);
        assert_eq!(ExpenseError::Config("bad".into()).kind(), ErrorKind::Local);
        assert!(ExpenseError::Validation("x".into()).is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
