extern crate self as socialsim_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities
pub use entities::{ChatTurn, InteractionLog, Sender, MAX_SCENARIO_CHARS, MAX_TURN_CHARS};

pub use error::DomainError;

// Re-export ID types
pub use ids::{InteractionLogId, UserId};

// Re-export value objects
pub use value_objects::{
    clean_mood_tags, parse_mood_tags, AnalyticsSummary, ConversationContext, ConversationWindow,
    DayCount, ErrorDetail, ModerationVerdict, Mood, MoodParse, OrchestrationResult,
    ANALYTICS_WINDOW_DAYS, DEFAULT_SCENARIO, FALLBACK_SUGGESTIONS, FLAGGED_FEEDBACK,
    HISTORY_WINDOW, MOOD_TAGS, NOT_CONFIGURED_REPLY, PROVIDER_ERROR_REPLY, SUGGESTION_COUNT,
};
