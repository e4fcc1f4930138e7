use serde::{Deserialize, Serialize};

/// Gentle redirect shown to the child when a message is flagged.
pub const FLAGGED_FEEDBACK: &str = "That might sound a bit mean. How about we try a different way?";

/// Outcome of the vibe check on a child's message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ModerationVerdict {
    Pass,
    Flag { feedback: String },
}

impl ModerationVerdict {
    /// Flag with the standard feedback text
    pub fn flag() -> Self {
        Self::Flag {
            feedback: FLAGGED_FEEDBACK.to_string(),
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Flag { .. })
    }
}
