//! Domain entities

mod chat_turn;
mod interaction_log;

pub use chat_turn::{ChatTurn, Sender, MAX_TURN_CHARS};
pub use interaction_log::{InteractionLog, MAX_SCENARIO_CHARS};
