//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    ports::{ClockPort, InteractionLogRepo, LlmPort},
};
use crate::prompt_templates::PromptTemplates;
use crate::use_cases;

/// Main application state.
///
/// Holds the use cases wired over their ports.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

pub struct UseCases {
    pub interaction: use_cases::InteractionUseCases,
    pub analytics: use_cases::AnalyticsUseCases,
}

impl App {
    /// `llm` is `None` when no provider could be configured; chat requests
    /// then answer with a not-configured error instead of failing.
    pub fn new(
        llm: Option<Arc<dyn LlmPort>>,
        interaction_logs: Arc<dyn InteractionLogRepo>,
        templates: &PromptTemplates,
    ) -> Self {
        Self::with_clock(llm, interaction_logs, Arc::new(SystemClock::new()), templates)
    }

    pub fn with_clock(
        llm: Option<Arc<dyn LlmPort>>,
        interaction_logs: Arc<dyn InteractionLogRepo>,
        clock: Arc<dyn ClockPort>,
        templates: &PromptTemplates,
    ) -> Self {
        let orchestrator = Arc::new(use_cases::InteractionOrchestrator::from_provider(
            llm, templates,
        ));

        let chat = Arc::new(use_cases::ChatOps::new(
            orchestrator,
            interaction_logs.clone(),
            clock.clone(),
        ));
        let summary = Arc::new(use_cases::SummaryOps::new(interaction_logs, clock));

        Self {
            use_cases: UseCases {
                interaction: use_cases::InteractionUseCases::new(chat),
                analytics: use_cases::AnalyticsUseCases::new(summary),
            },
        }
    }
}
