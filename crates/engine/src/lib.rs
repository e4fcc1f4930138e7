//! SocialSim Engine library.
//!
//! Server-side code for the social-skills roleplay backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Moderation, roleplay, suggestions and analytics
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `prompt_templates` - Default prompts and environment overrides
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod prompt_templates;
pub mod use_cases;

/// Test doubles shared across unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
