//! Analytics record for one chat request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{InteractionLogId, UserId};
use crate::value_objects::{Mood, OrchestrationResult};

/// Longest scenario label stored with a log entry.
pub const MAX_SCENARIO_CHARS: usize = 64;

/// Outcome of one chat request, kept for parent review.
///
/// `mood` is `None` exactly when `flagged` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionLog {
    pub id: InteractionLogId,
    pub user_id: UserId,
    pub scenario: String,
    pub mood: Option<Mood>,
    pub flagged: bool,
    pub created_at: DateTime<Utc>,
}

impl InteractionLog {
    /// Build the log entry for an orchestration outcome.
    ///
    /// Flagged messages carry no mood; errors are recorded as neutral so the
    /// parent view still counts the attempt.
    pub fn from_result(
        user_id: UserId,
        scenario: &str,
        result: &OrchestrationResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (mood, flagged) = match result {
            OrchestrationResult::Success { mood, .. } => (Some(*mood), false),
            OrchestrationResult::Flagged { .. } => (None, true),
            OrchestrationResult::Error { .. } => (Some(Mood::Neutral), false),
        };

        Self {
            id: InteractionLogId::new(),
            user_id,
            scenario: scenario.chars().take(MAX_SCENARIO_CHARS).collect(),
            mood,
            flagged,
            created_at,
        }
    }

    /// Mood as stored in the analytics table (`""` for flagged entries).
    pub fn mood_label(&self) -> &'static str {
        self.mood.map(|m| m.as_str()).unwrap_or("")
    }
}
