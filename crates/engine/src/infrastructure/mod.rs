//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod gemini;
pub mod interaction_log;
pub mod openai_compat;
pub mod ports;
pub mod timeout_llm;
