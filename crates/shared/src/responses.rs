//! Response bodies returned by the HTTP API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use socialsim_domain::AnalyticsSummary;

/// Error body, e.g. `{"error": "Message is required"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Interactions on one day, date formatted as `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCountData {
    pub date: String,
    pub count: u64,
}

/// Body of `GET /api/analytics`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub total_interactions: u64,
    pub flagged_count: u64,
    pub by_scenario: BTreeMap<String, u64>,
    pub by_mood: BTreeMap<String, u64>,
    pub last_7_days: Vec<DayCountData>,
}

impl From<AnalyticsSummary> for AnalyticsResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            total_interactions: summary.total_interactions,
            flagged_count: summary.flagged_count,
            by_scenario: summary.by_scenario,
            by_mood: summary.by_mood,
            last_7_days: summary
                .last_7_days
                .into_iter()
                .map(|day| DayCountData {
                    date: day.date.format("%Y-%m-%d").to_string(),
                    count: day.count,
                })
                .collect(),
        }
    }
}
