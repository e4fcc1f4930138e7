//! Vibe check on a child's message before any roleplay happens.

use std::sync::Arc;

use socialsim_domain::ModerationVerdict;

use crate::infrastructure::ports::{ChatMessage, LlmError, LlmPort, LlmRequest};

/// Keyword in the classifier reply that rejects the message.
const REJECT_KEYWORD: &str = "FLAG";

pub struct VibeFilter {
    llm: Arc<dyn LlmPort>,
    system_prompt: String,
}

impl VibeFilter {
    pub fn new(llm: Arc<dyn LlmPort>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
        }
    }

    /// Classify `message` as PASS or FLAG.
    ///
    /// Any non-blank reply that does not contain `FLAG` (case-insensitive)
    /// passes. A blank reply is an invalid response; provider faults are
    /// returned to the caller untouched.
    pub async fn moderate(&self, message: &str) -> Result<ModerationVerdict, LlmError> {
        let request = LlmRequest::new(vec![ChatMessage::user(message)])
            .with_system_prompt(self.system_prompt.clone())
            .with_temperature(0.0);

        let response = self.llm.generate(request).await?;
        if response.content.trim().is_empty() {
            return Err(LlmError::InvalidResponse("Empty vibe check reply".into()));
        }
        let verdict = classify(&response.content);

        tracing::debug!(
            message_chars = message.chars().count(),
            flagged = verdict.is_flagged(),
            "Vibe check complete"
        );

        Ok(verdict)
    }
}

fn classify(reply: &str) -> ModerationVerdict {
    if reply.trim().to_uppercase().contains(REJECT_KEYWORD) {
        ModerationVerdict::flag()
    } else {
        ModerationVerdict::Pass
    }
}
