//! Externally visible outcome of one orchestration run

use serde::{Deserialize, Serialize};
use std::fmt;

use super::moderation::FLAGGED_FEEDBACK;
use super::mood::Mood;

/// Number of suggestions presented with every successful reply.
pub const SUGGESTION_COUNT: usize = 4;

/// Generic phrases used when suggestion generation fails or comes back short.
pub const FALLBACK_SUGGESTIONS: [&str; SUGGESTION_COUNT] =
    ["Hi!", "Thank you", "Can you help me?", "Sorry"];

/// Friendly reply shown when the generation service fails mid-run.
pub const PROVIDER_ERROR_REPLY: &str =
    "⚠️ Oops! I couldn't think of what to say just now. Let's try that again.";

/// Reply shown when no generation service is configured.
pub const NOT_CONFIGURED_REPLY: &str =
    "⚠️ Chat helper is not configured. Please set the GEMINI_API_KEY environment variable.";

/// Redacted fault category returned to clients in place of raw error text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDetail {
    Timeout,
    ProviderUnavailable,
    InvalidResponse,
    Unauthorized,
    NotConfigured,
}

impl ErrorDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorDetail::Timeout => "timeout",
            ErrorDetail::ProviderUnavailable => "provider_unavailable",
            ErrorDetail::InvalidResponse => "invalid_response",
            ErrorDetail::Unauthorized => "unauthorized",
            ErrorDetail::NotConfigured => "not_configured",
        }
    }

    /// The child-facing message for this fault
    pub fn reply(&self) -> &'static str {
        match self {
            ErrorDetail::NotConfigured => NOT_CONFIGURED_REPLY,
            _ => PROVIDER_ERROR_REPLY,
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of moderating and answering one child message.
///
/// Serialized with a `status` tag so the client can switch on
/// `success` / `flagged` / `error`. Only `Success` carries a character mood;
/// the `mood` on `Error` is always [`Mood::Neutral`] and exists so the UI
/// can show a calm face instead of a raw failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OrchestrationResult {
    Success {
        reply: String,
        mood: Mood,
        suggestions: Vec<String>,
    },
    Flagged {
        feedback: String,
    },
    Error {
        reply: String,
        mood: Mood,
        detail: ErrorDetail,
    },
}

impl OrchestrationResult {
    pub fn success(reply: impl Into<String>, mood: Mood, suggestions: Vec<String>) -> Self {
        Self::Success {
            reply: reply.into(),
            mood,
            suggestions,
        }
    }

    pub fn flagged() -> Self {
        Self::Flagged {
            feedback: FLAGGED_FEEDBACK.to_string(),
        }
    }

    pub fn error(detail: ErrorDetail) -> Self {
        Self::Error {
            reply: detail.reply().to_string(),
            mood: Mood::Neutral,
            detail,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Flagged { .. } => "flagged",
            Self::Error { .. } => "error",
        }
    }

    /// Character mood, present only on success
    pub fn character_mood(&self) -> Option<Mood> {
        match self {
            Self::Success { mood, .. } => Some(*mood),
            _ => None,
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Flagged { .. })
    }
}
