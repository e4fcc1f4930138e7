//! Configurable LLM prompt templates used by the engine.
//!
//! Every template has a hard-coded default and can be replaced at startup by
//! setting `SOCIALSIM_PROMPT_<KEY>` (see [`key_to_env_var`]). Placeholders are
//! written as `{name}` and filled in with [`render`].

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// All prompt template keys as constants.
pub mod keys {
    /// System instruction for the PASS/FLAG classifier.
    pub const VIBE_SYSTEM_PROMPT: &str = "vibe.system_prompt";
    /// Persona and mood rules for the roleplay character.
    pub const ROLEPLAY_SYSTEM_PROMPT: &str = "roleplay.system_prompt";
    /// Prefix added to the child's message when history exists.
    pub const ROLEPLAY_CONTINUATION_PREFIX: &str = "roleplay.continuation_prefix";
    /// Instruction for generating reply phrases.
    pub const SUGGESTION_PROMPT: &str = "suggestion.prompt";
}

/// Default values for all prompt templates.
pub mod defaults {
    /// Permissive classifier: only clear meanness is flagged.
    pub const VIBE_SYSTEM_PROMPT: &str = r#"You are a gentle social skills coach for children.
Decide whether the child's message is clearly mean or inappropriate for a child.

FLAG only if the message contains:
- Insults or name-calling
- Threats
- Profanity
- Deliberate cruelty
- Adult or unsafe topics

PASS everything else, including:
- Frustration ("this is hard", "I'm annoyed")
- Refusal ("no thanks", "I don't want to")
- Boredom, shyness, or short answers
- Sadness or worry

Reply ONLY with 'FLAG' or 'PASS'."#;

    /// Use {scenario} for the setting.
    pub const ROLEPLAY_SYSTEM_PROMPT: &str = r#"You are a friendly character in a {scenario}. You are talking with a child who is practicing social skills.

CONTINUITY:
- Stay in the conversation. If you asked a question or made an offer, respond to what the child said about it.
- Do not greet the child again or restart the conversation.
- Keep replies short (1-3 sentences) and use simple words.

MOOD:
- HAPPY only when the child is explicitly kind, polite, or grateful (saying please, thank you, offering help). A plain greeting is not enough.
- SAD when the child is a little rude or dismissive.
- ANGRY when the child is clearly unkind or cruel.
- NEUTRAL for everything else, including greetings and ordinary questions.

At the very end of your reply add exactly one tag: [HAPPY], [SAD], [ANGRY], or [NEUTRAL]."#;

    /// Nudge prepended to the child's message in an ongoing conversation.
    pub const ROLEPLAY_CONTINUATION_PREFIX: &str =
        "(Continue the conversation above. Reply to this, do not start over.) ";

    /// Use {scenario} for the setting and {reply} for what the character just said.
    pub const SUGGESTION_PROMPT: &str = r#"A child is practicing conversation in a {scenario}.
The character just said: "{reply}"

Write exactly 4 short things the child could say next (each under 10 words).
Every phrase must respond directly to what the character just said.
Do not change the topic or introduce new subjects.
Put each phrase on its own line with no extra text."#;
}

/// Convert a template key to its environment variable name.
pub fn key_to_env_var(key: &str) -> String {
    format!("SOCIALSIM_PROMPT_{}", key.to_uppercase().replace('.', "_"))
}

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Fill `{name}` placeholders in a template.
///
/// All placeholders are filled in one pass over the template, so braces
/// inside substituted values are left alone. Unknown names stay as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| (*value).to_string())
        })
        .into_owned()
}

/// Resolved prompt templates for one engine instance.
///
/// Resolution priority: override (from environment) > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub vibe_system_prompt: String,
    pub roleplay_system_prompt: String,
    pub roleplay_continuation_prefix: String,
    pub suggestion_prompt: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            vibe_system_prompt: defaults::VIBE_SYSTEM_PROMPT.to_string(),
            roleplay_system_prompt: defaults::ROLEPLAY_SYSTEM_PROMPT.to_string(),
            roleplay_continuation_prefix: defaults::ROLEPLAY_CONTINUATION_PREFIX.to_string(),
            suggestion_prompt: defaults::SUGGESTION_PROMPT.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Resolve every template from process environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str, default: &str| {
            lookup(&key_to_env_var(key))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            vibe_system_prompt: resolve(keys::VIBE_SYSTEM_PROMPT, defaults::VIBE_SYSTEM_PROMPT),
            roleplay_system_prompt: resolve(
                keys::ROLEPLAY_SYSTEM_PROMPT,
                defaults::ROLEPLAY_SYSTEM_PROMPT,
            ),
            roleplay_continuation_prefix: resolve(
                keys::ROLEPLAY_CONTINUATION_PREFIX,
                defaults::ROLEPLAY_CONTINUATION_PREFIX,
            ),
            suggestion_prompt: resolve(keys::SUGGESTION_PROMPT, defaults::SUGGESTION_PROMPT),
        }
    }
}
