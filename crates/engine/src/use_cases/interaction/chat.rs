//! Chat turn use case: validate, orchestrate, record.

use std::sync::Arc;

use socialsim_domain::{DomainError, InteractionLog, OrchestrationResult, UserId};
use socialsim_shared::ChatRequest;

use super::orchestrator::InteractionOrchestrator;
use crate::infrastructure::ports::{ClockPort, InteractionLogRepo};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Rejected before any provider call.
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<DomainError> for ChatError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) | DomainError::Parse(msg) => Self::InvalidRequest(msg),
        }
    }
}

pub struct ChatOps {
    orchestrator: Arc<InteractionOrchestrator>,
    logs: Arc<dyn InteractionLogRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ChatOps {
    pub fn new(
        orchestrator: Arc<InteractionOrchestrator>,
        logs: Arc<dyn InteractionLogRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            orchestrator,
            logs,
            clock,
        }
    }

    /// Run one chat turn for `user_id` and record it for analytics.
    ///
    /// Only request validation can fail. A failure to record the log is
    /// logged and does not change the result.
    pub async fn execute(
        &self,
        user_id: UserId,
        request: ChatRequest,
    ) -> Result<OrchestrationResult, ChatError> {
        let context = request.into_context()?;
        let result = self.orchestrator.orchestrate(&context).await;

        let log = InteractionLog::from_result(user_id, &context.scenario, &result, self.clock.now());
        if let Err(e) = self.logs.save(&log).await {
            tracing::warn!(
                error = %e,
                user_id = %log.user_id,
                "Failed to record interaction log"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use socialsim_domain::Mood;
    use socialsim_shared::HistoryEntry;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockInteractionLogRepo, RepoError};
    use crate::prompt_templates::PromptTemplates;
    use crate::test_fixtures::ScriptedLlm;

    fn ops(llm: Arc<ScriptedLlm>, logs: MockInteractionLogRepo) -> ChatOps {
        let now = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid date");
        ChatOps::new(
            Arc::new(InteractionOrchestrator::new(llm, &PromptTemplates::default())),
            Arc::new(logs),
            Arc::new(FixedClock(now)),
        )
    }

    fn user() -> UserId {
        UserId::new("kid-7").expect("valid user id")
    }

    #[tokio::test]
    async fn test_flagged_turn_is_logged_without_mood() {
        let llm = Arc::new(ScriptedLlm::replying(&["FLAG"]));
        let mut logs = MockInteractionLogRepo::new();
        logs.expect_save()
            .withf(|log| log.flagged && log.mood.is_none() && log.scenario == "Classroom")
            .times(1)
            .returning(|_| Ok(()));

        let result = ops(llm, logs)
            .execute(user(), ChatRequest::new("You're so stupid").with_scenario("Classroom"))
            .await
            .expect("valid request");

        assert!(result.is_flagged());
    }

    #[tokio::test]
    async fn test_success_is_logged_with_reply_mood() {
        let llm = Arc::new(ScriptedLlm::replying(&["PASS", "Yay! [HAPPY]", "Thanks"]));
        let mut logs = MockInteractionLogRepo::new();
        logs.expect_save()
            .withf(|log| {
                !log.flagged && log.mood == Some(Mood::Happy) && log.scenario == "Grocery Store"
            })
            .times(1)
            .returning(|_| Ok(()));

        let result = ops(llm, logs)
            .execute(user(), ChatRequest::new("Thank you!"))
            .await
            .expect("valid request");

        assert_eq!(result.character_mood(), Some(Mood::Happy));
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_provider_calls() {
        let llm = Arc::new(ScriptedLlm::replying(&["PASS"]));
        let mut logs = MockInteractionLogRepo::new();
        logs.expect_save().never();

        let ops = ops(llm.clone(), logs);
        let blank = ops.execute(user(), ChatRequest::new("   ")).await;
        let bad_history = ops
            .execute(
                user(),
                ChatRequest::new("Hi").with_history(vec![HistoryEntry {
                    sender: "robot".into(),
                    text: "beep".into(),
                    mood: None,
                }]),
            )
            .await;

        assert!(matches!(blank, Err(ChatError::InvalidRequest(msg)) if msg == "Message is required"));
        assert!(matches!(bad_history, Err(ChatError::InvalidRequest(msg)) if msg.contains("robot")));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_log_failure_does_not_change_result() {
        let llm = Arc::new(ScriptedLlm::replying(&["PASS", "Hello. [NEUTRAL]", "Hi"]));
        let mut logs = MockInteractionLogRepo::new();
        logs.expect_save()
            .times(1)
            .returning(|_| Err(RepoError::database("interaction_logs", "disk full")));

        let result = ops(llm, logs)
            .execute(user(), ChatRequest::new("Hello"))
            .await
            .expect("valid request");

        assert_eq!(result.status(), "success");
    }
}
