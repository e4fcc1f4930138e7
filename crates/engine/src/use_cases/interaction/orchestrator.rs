//! One child message through the full pipeline.
//!
//! ```text
//! START -> MODERATING -> FLAGGED_END
//!                     -> RESPONDING -> SUGGESTING -> SUCCESS_END
//! ```
//!
//! A provider fault while moderating or responding ends the run with an
//! error result. Suggestion faults are absorbed by the generator. The
//! orchestrator itself always produces an [`OrchestrationResult`].

use std::sync::Arc;

use socialsim_domain::{ConversationContext, ErrorDetail, ModerationVerdict, OrchestrationResult};

use super::roleplay::RoleplayResponder;
use super::suggestions::SuggestionGenerator;
use super::vibe_filter::VibeFilter;
use crate::infrastructure::ports::{LlmError, LlmPort};
use crate::prompt_templates::PromptTemplates;

struct Pipeline {
    vibe: VibeFilter,
    roleplay: RoleplayResponder,
    suggestions: SuggestionGenerator,
}

pub struct InteractionOrchestrator {
    /// `None` when no provider could be configured.
    pipeline: Option<Pipeline>,
}

impl InteractionOrchestrator {
    pub fn new(llm: Arc<dyn LlmPort>, templates: &PromptTemplates) -> Self {
        let pipeline = Pipeline {
            vibe: VibeFilter::new(llm.clone(), templates.vibe_system_prompt.clone()),
            roleplay: RoleplayResponder::new(
                llm.clone(),
                templates.roleplay_system_prompt.clone(),
                templates.roleplay_continuation_prefix.clone(),
            ),
            suggestions: SuggestionGenerator::new(llm, templates.suggestion_prompt.clone()),
        };
        Self {
            pipeline: Some(pipeline),
        }
    }

    /// Orchestrator that answers every run with a not-configured error.
    pub fn unconfigured() -> Self {
        Self { pipeline: None }
    }

    pub fn from_provider(llm: Option<Arc<dyn LlmPort>>, templates: &PromptTemplates) -> Self {
        match llm {
            Some(llm) => Self::new(llm, templates),
            None => Self::unconfigured(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.pipeline.is_some()
    }

    pub async fn orchestrate(&self, context: &ConversationContext) -> OrchestrationResult {
        let Some(pipeline) = &self.pipeline else {
            tracing::warn!("No LLM provider configured, skipping pipeline");
            return OrchestrationResult::error(ErrorDetail::NotConfigured);
        };

        let verdict = match pipeline.vibe.moderate(context.message()).await {
            Ok(verdict) => verdict,
            Err(e) => return provider_fault("moderating", e),
        };
        if let ModerationVerdict::Flag { feedback } = verdict {
            tracing::info!(scenario = %context.scenario, "Message flagged by vibe check");
            return OrchestrationResult::Flagged { feedback };
        }

        let reply = match pipeline.roleplay.respond(context).await {
            Ok(reply) => reply,
            Err(e) => return provider_fault("responding", e),
        };

        let suggestions = pipeline
            .suggestions
            .suggest(&context.scenario, &reply.text)
            .await;

        tracing::info!(
            scenario = %context.scenario,
            mood = %reply.mood,
            fallback_suggestions = suggestions.is_fallback(),
            "Interaction complete"
        );

        OrchestrationResult::success(reply.text, reply.mood, suggestions.into_phrases())
    }
}

fn provider_fault(stage: &'static str, error: LlmError) -> OrchestrationResult {
    let detail = error.detail();
    tracing::error!(stage, error = %error, detail = %detail, "LLM provider fault, aborting interaction");
    OrchestrationResult::error(detail)
}
