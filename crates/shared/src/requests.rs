//! Request bodies accepted by the HTTP API

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use socialsim_domain::{
    ChatTurn, ConversationContext, ConversationWindow, DomainError, Mood, Sender,
};

/// Error text returned when the chat message is missing or blank.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// One prior turn as sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// `user` for the child, `assistant` for the character
    pub sender: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl HistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: "user".to_string(),
            text: text.into(),
            mood: None,
        }
    }

    pub fn assistant(text: impl Into<String>, mood: Mood) -> Self {
        Self {
            sender: "assistant".to_string(),
            text: text.into(),
            mood: Some(mood.as_str().to_string()),
        }
    }

    /// Convert into a domain turn, rejecting blank text and unknown senders
    /// and moods.
    pub fn to_turn(&self) -> Result<ChatTurn, DomainError> {
        let sender = Sender::from_wire(&self.sender)?;
        if self.text.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "History text is required for sender: {}",
                self.sender
            )));
        }
        let mood = match self.mood.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Mood>().map_err(|_| {
                DomainError::validation(format!("Unknown history mood: {}", raw))
            })?),
        };
        Ok(ChatTurn::new(sender, self.text.clone(), mood))
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(
        required(message = "Message is required"),
        custom(function = "not_blank", message = "Message is required")
    )]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = Some(history);
        self
    }

    /// Validate the request and build the orchestration context.
    ///
    /// Every history entry is checked, then only the most recent window of
    /// turns is kept.
    pub fn into_context(self) -> Result<ConversationContext, DomainError> {
        self.validate()
            .map_err(|_| DomainError::validation(MESSAGE_REQUIRED))?;

        let turns = self
            .history
            .unwrap_or_default()
            .iter()
            .map(HistoryEntry::to_turn)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConversationContext::new(
            self.scenario.unwrap_or_default(),
            ConversationWindow::new(turns),
            self.message.unwrap_or_default(),
        ))
    }
}
