//! Conversation window and per-request context

use serde::{Deserialize, Serialize};

use crate::entities::ChatTurn;

/// Most prior turns forwarded to the roleplay stage.
pub const HISTORY_WINDOW: usize = 12;

/// Scenario used when the caller does not name one.
pub const DEFAULT_SCENARIO: &str = "Grocery Store";

/// The most recent turns of a conversation, oldest first.
///
/// Never holds more than [`HISTORY_WINDOW`] turns. Building from a longer
/// sequence drops the oldest turns and keeps the rest in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationWindow {
    turns: Vec<ChatTurn>,
}

impl ConversationWindow {
    pub fn new(turns: impl IntoIterator<Item = ChatTurn>) -> Self {
        let mut turns: Vec<ChatTurn> = turns.into_iter().collect();
        if turns.len() > HISTORY_WINDOW {
            turns.drain(..turns.len() - HISTORY_WINDOW);
        }
        Self { turns }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl FromIterator<ChatTurn> for ConversationWindow {
    fn from_iter<I: IntoIterator<Item = ChatTurn>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Everything one orchestration run needs to know about the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub scenario: String,
    pub history: ConversationWindow,
    pub current_message: ChatTurn,
}

impl ConversationContext {
    /// Build a context. A blank scenario falls back to [`DEFAULT_SCENARIO`].
    pub fn new(scenario: impl Into<String>, history: ConversationWindow, message: impl Into<String>) -> Self {
        let scenario = scenario.into();
        let scenario = if scenario.trim().is_empty() {
            DEFAULT_SCENARIO.to_string()
        } else {
            scenario.trim().to_string()
        };

        Self {
            scenario,
            history,
            current_message: ChatTurn::child(message),
        }
    }

    pub fn message(&self) -> &str {
        self.current_message.text()
    }
}
