//! Parent-facing analytics over recorded interactions.

use std::sync::Arc;

use socialsim_domain::{AnalyticsSummary, UserId};

use crate::infrastructure::ports::{ClockPort, InteractionLogRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct AnalyticsUseCases {
    pub summary: Arc<SummaryOps>,
}

impl AnalyticsUseCases {
    pub fn new(summary: Arc<SummaryOps>) -> Self {
        Self { summary }
    }
}

pub struct SummaryOps {
    logs: Arc<dyn InteractionLogRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SummaryOps {
    pub fn new(logs: Arc<dyn InteractionLogRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { logs, clock }
    }

    /// Totals, scenario and mood breakdowns, and the last 7 days of activity.
    pub async fn execute(&self, user_id: &UserId) -> Result<AnalyticsSummary, AnalyticsError> {
        let logs = self.logs.list_for_user(user_id).await?;
        let summary = AnalyticsSummary::from_logs(&logs, self.clock.now());

        tracing::debug!(
            user_id = %user_id,
            total = summary.total_interactions,
            flagged = summary.flagged_count,
            "Analytics summary built"
        );

        Ok(summary)
    }
}
