//! Child chat interactions: moderation, roleplay and suggestions.

mod chat;
mod orchestrator;
mod roleplay;
mod suggestions;
mod vibe_filter;

use std::sync::Arc;

pub use chat::{ChatError, ChatOps};
pub use orchestrator::InteractionOrchestrator;
pub use roleplay::{RoleplayReply, RoleplayResponder};
pub use suggestions::{parse_suggestions, SuggestionError, SuggestionGenerator, SuggestionSet};
pub use vibe_filter::VibeFilter;

pub struct InteractionUseCases {
    pub chat: Arc<ChatOps>,
}

impl InteractionUseCases {
    pub fn new(chat: Arc<ChatOps>) -> Self {
        Self { chat }
    }
}
