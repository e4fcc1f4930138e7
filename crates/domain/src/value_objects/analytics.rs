//! Parent-facing summary of a child's practice sessions

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::mood::Mood;
use crate::entities::InteractionLog;

/// How many days back the daily activity series reaches.
pub const ANALYTICS_WINDOW_DAYS: i64 = 7;

/// Interactions on one UTC calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Aggregated view over a user's interaction logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_interactions: u64,
    pub flagged_count: u64,
    pub by_scenario: BTreeMap<String, u64>,
    pub by_mood: BTreeMap<String, u64>,
    pub last_7_days: Vec<DayCount>,
}

impl AnalyticsSummary {
    /// Summarize `logs` as of `now`.
    ///
    /// Flagged entries count toward `flagged_count` but not `by_mood`.
    /// Non-flagged entries without a mood count as `NEUTRAL`.
    pub fn from_logs(logs: &[InteractionLog], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(ANALYTICS_WINDOW_DAYS);
        let mut summary = Self {
            total_interactions: logs.len() as u64,
            ..Self::default()
        };
        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        for log in logs {
            *summary.by_scenario.entry(log.scenario.clone()).or_default() += 1;

            if log.flagged {
                summary.flagged_count += 1;
            } else {
                let mood = log.mood.unwrap_or(Mood::Neutral);
                *summary.by_mood.entry(mood.as_str().to_string()).or_default() += 1;
            }

            if log.created_at >= cutoff {
                *per_day.entry(log.created_at.date_naive()).or_default() += 1;
            }
        }

        summary.last_7_days = per_day
            .into_iter()
            .map(|(date, count)| DayCount { date, count })
            .collect();
        summary
    }
}
