//! A single utterance in a roleplay conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Mood;
use crate::DomainError;

/// Upper bound on the characters kept from one turn's text.
pub const MAX_TURN_CHARS: usize = 1000;

/// Who spoke a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The child using the app
    Child,
    /// The roleplay character
    Character,
}

impl Sender {
    /// Parse the wire sender names used by the chat client (`user` / `assistant`).
    pub fn from_wire(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_lowercase().as_str() {
            "user" | "child" => Ok(Sender::Child),
            "assistant" | "character" => Ok(Sender::Character),
            other => Err(DomainError::validation(format!(
                "Unknown history sender: {}",
                other
            ))),
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Sender::Child => "user",
            Sender::Character => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One utterance in a conversation.
///
/// Immutable once created. The mood is kept only on character turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    sender: Sender,
    text: String,
    mood: Option<Mood>,
}

impl ChatTurn {
    /// Create a turn, truncating text to [`MAX_TURN_CHARS`].
    pub fn new(sender: Sender, text: impl Into<String>, mood: Option<Mood>) -> Self {
        let text = truncate_chars(text.into(), MAX_TURN_CHARS);
        let mood = match sender {
            Sender::Character => mood,
            Sender::Child => None,
        };
        Self { sender, text, mood }
    }

    pub fn child(text: impl Into<String>) -> Self {
        Self::new(Sender::Child, text, None)
    }

    pub fn character(text: impl Into<String>, mood: Mood) -> Self {
        Self::new(Sender::Character, text, Some(mood))
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_senders() {
        assert_eq!(Sender::from_wire("user"), Ok(Sender::Child));
        assert_eq!(Sender::from_wire("Assistant"), Ok(Sender::Character));
        assert!(Sender::from_wire("narrator").is_err());
        assert_eq!(Sender::Child.as_wire(), "user");
    }

    #[test]
    fn test_child_turn_drops_mood() {
        let turn = ChatTurn::new(Sender::Child, "hi", Some(Mood::Happy));
        assert_eq!(turn.mood(), None);
    }

    #[test]
    fn test_character_turn_keeps_mood() {
        let turn = ChatTurn::character("Hello!", Mood::Happy);
        assert_eq!(turn.sender(), Sender::Character);
        assert_eq!(turn.mood(), Some(Mood::Happy));
    }

    #[test]
    fn test_text_is_bounded_on_char_boundary() {
        let long = "é".repeat(MAX_TURN_CHARS + 10);
        let turn = ChatTurn::child(long);
        assert_eq!(turn.text().chars().count(), MAX_TURN_CHARS);
    }
}
