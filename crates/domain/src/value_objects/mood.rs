//! Character mood value object
//!
//! The roleplay character reacts to each child message with one of four
//! moods. The mood drives the character's face in the child-facing UI and
//! is recorded in analytics for parent review.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Emotional reaction of the roleplay character to the child's message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mood {
    /// Explicit kindness, courtesy, or gratitude from the child
    Happy,
    /// Hurt by mild rudeness
    Sad,
    /// Reaction to clear cruelty
    Angry,
    /// Default for bland or ambiguous input
    #[default]
    Neutral,
}

impl Mood {
    /// Get all moods for analytics breakdowns
    pub fn all() -> &'static [Mood] {
        &[Mood::Happy, Mood::Sad, Mood::Angry, Mood::Neutral]
    }

    /// Wire representation, also used as the analytics value
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Sad => "SAD",
            Mood::Angry => "ANGRY",
            Mood::Neutral => "NEUTRAL",
        }
    }

    /// Bracketed tag the generation service embeds in its reply
    pub fn tag(&self) -> &'static str {
        match self {
            Mood::Happy => "[HAPPY]",
            Mood::Sad => "[SAD]",
            Mood::Angry => "[ANGRY]",
            Mood::Neutral => "[NEUTRAL]",
        }
    }

    /// Get an emoji representation for UI
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Angry => "😠",
            Mood::Neutral => "😐",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HAPPY" => Ok(Mood::Happy),
            "SAD" => Ok(Mood::Sad),
            "ANGRY" => Ok(Mood::Angry),
            "NEUTRAL" => Ok(Mood::Neutral),
            _ => Err(DomainError::parse(format!("Unknown mood: {}", s))),
        }
    }
}
