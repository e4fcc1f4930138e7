//! In-character reply generation.
//!
//! The retained history is replayed to the provider on every call, so the
//! character keeps continuity without any server-side session. The raw
//! reply is parsed into a [`Mood`] immediately and the tags never leave
//! this module.

use std::sync::Arc;

use socialsim_domain::{parse_mood_tags, ConversationContext, Mood, Sender};

use crate::infrastructure::ports::{ChatMessage, LlmError, LlmPort, LlmRequest};
use crate::prompt_templates::render;

/// Cleaned character reply and its mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleplayReply {
    pub text: String,
    pub mood: Mood,
}

pub struct RoleplayResponder {
    llm: Arc<dyn LlmPort>,
    system_prompt: String,
    continuation_prefix: String,
}

impl RoleplayResponder {
    /// `system_prompt` may contain a `{scenario}` placeholder.
    pub fn new(
        llm: Arc<dyn LlmPort>,
        system_prompt: impl Into<String>,
        continuation_prefix: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            continuation_prefix: continuation_prefix.into(),
        }
    }

    pub async fn respond(&self, context: &ConversationContext) -> Result<RoleplayReply, LlmError> {
        let request = self.build_request(context);
        let response = self.llm.generate(request).await?;
        let parsed = parse_mood_tags(&response.content);

        if parsed.clean_text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Roleplay reply had no text besides mood tags".into(),
            ));
        }

        tracing::debug!(
            scenario = %context.scenario,
            history_turns = context.history.len(),
            mood = %parsed.mood,
            "Roleplay reply generated"
        );

        Ok(RoleplayReply {
            text: parsed.clean_text,
            mood: parsed.mood,
        })
    }

    fn build_request(&self, context: &ConversationContext) -> LlmRequest {
        let mut messages: Vec<ChatMessage> = context
            .history
            .turns()
            .iter()
            .map(|turn| match turn.sender() {
                Sender::Child => ChatMessage::user(turn.text()),
                Sender::Character => ChatMessage::assistant(turn.text()),
            })
            .collect();

        let message = if context.history.is_empty() {
            context.message().to_string()
        } else {
            format!("{}{}", self.continuation_prefix, context.message())
        };
        messages.push(ChatMessage::user(message));

        LlmRequest::new(messages)
            .with_system_prompt(render(
                &self.system_prompt,
                &[("scenario", context.scenario.as_str())],
            ))
            .with_temperature(0.7)
    }
}
