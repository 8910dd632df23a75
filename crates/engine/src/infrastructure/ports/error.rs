//! Error types for port operations.

use luckywheel_domain::DomainError;

/// Session store errors. Never fatal: the engine logs them and carries on
/// with its in-memory session.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying storage failed - includes the operation for tracing.
    #[error("Storage error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store refused the request (quota, disabled storage, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Roster source could not be read: {0}")]
    Io(String),
    #[error("Roster source is malformed: {0}")]
    Parse(String),
    #[error("Roster is invalid: {0}")]
    Invalid(#[from] DomainError),
}
