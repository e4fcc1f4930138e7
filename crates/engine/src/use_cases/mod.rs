//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area.
//! Use cases orchestrate across ports to fulfill user stories.

pub mod analytics;
pub mod interaction;

// Re-export main types
pub use analytics::{AnalyticsError, AnalyticsUseCases, SummaryOps};
pub use interaction::{ChatError, ChatOps, InteractionOrchestrator, InteractionUseCases};
