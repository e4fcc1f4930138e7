//! Mood tag parsing for roleplay replies
//!
//! The generation service is prompted to end every in-character reply with
//! one bracketed mood tag such as `[HAPPY]`. This module turns that textual
//! protocol into a typed [`Mood`] and a display-ready reply.
//!
//! # Rules
//!
//! - Mood resolution follows a fixed priority: `[HAPPY]` > `[ANGRY]` > `[SAD]`.
//!   `[NEUTRAL]` or no tag at all resolves to [`Mood::Neutral`].
//! - All four tags are removed from the visible text regardless of which one
//!   decided the mood, then surrounding whitespace is trimmed.
//!
//! # Example
//!
//! ```
//! use socialsim_domain::{parse_mood_tags, Mood};
//!
//! let parsed = parse_mood_tags("Thanks for asking! [SAD] [HAPPY]");
//! assert_eq!(parsed.mood, Mood::Happy);
//! assert_eq!(parsed.clean_text, "Thanks for asking!");
//! ```

use serde::{Deserialize, Serialize};

use super::mood::Mood;

/// Every tag the generation service may emit, stripped from visible text.
pub const MOOD_TAGS: [&str; 4] = ["[HAPPY]", "[SAD]", "[ANGRY]", "[NEUTRAL]"];

/// Moods checked in priority order when a reply carries several tags.
const TAG_PRIORITY: [Mood; 3] = [Mood::Happy, Mood::Angry, Mood::Sad];

/// Result of parsing a raw roleplay reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodParse {
    /// Resolved mood of the character
    pub mood: Mood,
    /// Reply with all mood tags removed (for display)
    pub clean_text: String,
}

/// Parse a raw reply into its mood and tag-free text.
pub fn parse_mood_tags(raw: &str) -> MoodParse {
    let mood = TAG_PRIORITY
        .iter()
        .copied()
        .find(|mood| raw.contains(mood.tag()))
        .unwrap_or(Mood::Neutral);

    MoodParse {
        mood,
        clean_text: clean_mood_tags(raw),
    }
}

/// Remove every mood tag from `text` and trim the result.
///
/// Removal repeats until no tag substring is left, so text like
/// `[HA[SAD]PPY]` cannot reassemble a tag and the function is idempotent.
pub fn clean_mood_tags(text: &str) -> String {
    let mut cleaned = text.to_string();
    while MOOD_TAGS.iter().any(|tag| cleaned.contains(tag)) {
        for tag in MOOD_TAGS {
            cleaned = cleaned.replace(tag, "");
        }
    }
    cleaned.trim().to_string()
}
