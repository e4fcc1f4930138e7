//! Value objects - Immutable objects defined by their attributes

mod analytics;
mod conversation;
mod moderation;
mod mood;
mod mood_tags;
mod orchestration;

// Parent-facing analytics summary
pub use analytics::{AnalyticsSummary, DayCount, ANALYTICS_WINDOW_DAYS};

// Bounded conversation history
pub use conversation::{ConversationContext, ConversationWindow, DEFAULT_SCENARIO, HISTORY_WINDOW};

pub use moderation::{ModerationVerdict, FLAGGED_FEEDBACK};

// Mood and the bracketed tag protocol
pub use mood::Mood;
pub use mood_tags::{clean_mood_tags, parse_mood_tags, MoodParse, MOOD_TAGS};

pub use orchestration::{
    ErrorDetail, OrchestrationResult, FALLBACK_SUGGESTIONS, NOT_CONFIGURED_REPLY,
    PROVIDER_ERROR_REPLY, SUGGESTION_COUNT,
};
