//! Unified error types for the domain layer
//!
//! Provides a common error type for request-boundary validation and
//! value-object parsing, so adapters never need to pass raw strings around.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., missing message, malformed history entry)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for request-boundary violations.
    ///
    /// Use this when caller-supplied input is rejected before any
    /// provider call is made:
    /// - The chat message is empty or missing
    /// - A history entry names an unknown sender
    /// - A history entry carries an unknown mood
    ///
    /// # Example
    /// ```ignore
    /// if message.trim().is_empty() {
    ///     return Err(DomainError::validation("Message is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
