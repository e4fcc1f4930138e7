//! Error types for port operations.

use std::time::Duration;

use socialsim_domain::ErrorDetail;

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored row could not be turned back into a domain value.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),
    #[error("LLM provider rejected credentials: {0}")]
    Unauthorized(String),
}

impl LlmError {
    /// Redacted category safe to show to clients.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            LlmError::RequestFailed(_) => ErrorDetail::ProviderUnavailable,
            LlmError::InvalidResponse(_) => ErrorDetail::InvalidResponse,
            LlmError::Timeout(_) => ErrorDetail::Timeout,
            LlmError::Unauthorized(_) => ErrorDetail::Unauthorized,
        }
    }
}
