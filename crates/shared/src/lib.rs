//! SocialSim Shared - Wire types for the HTTP API
//!
//! This crate contains the JSON request and response bodies exchanged with
//! the child-facing app and the parent dashboard:
//! - Chat requests with sender-tagged history
//! - Error bodies
//! - Analytics summaries
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types, plus conversion into domain types
//! 2. **Validate at the edge** - Malformed input is rejected before any provider call

pub mod requests;
pub mod responses;

pub use requests::{ChatRequest, HistoryEntry, MESSAGE_REQUIRED};
pub use responses::{AnalyticsResponse, DayCountData, ErrorBody};

// The chat response body is the domain result itself.
pub use socialsim_domain::OrchestrationResult as ChatResponse;
