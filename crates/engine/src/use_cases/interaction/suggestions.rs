//! Follow-up phrase suggestions for the child.
//!
//! Suggestions are optional output. [`SuggestionGenerator::suggest`] never
//! fails: any provider fault or unusable response becomes
//! [`SuggestionSet::Fallback`].

use std::sync::{Arc, LazyLock};

use regex_lite::Regex;

use socialsim_domain::{FALLBACK_SUGGESTIONS, SUGGESTION_COUNT};

use crate::infrastructure::ports::{ChatMessage, LlmError, LlmPort, LlmRequest};
use crate::prompt_templates::render;

/// Character reply is cut to this many chars when building the prompt.
pub const REPLY_PROMPT_CHARS: usize = 300;

/// Candidates kept from the raw response before presentation.
const MAX_CANDIDATES: usize = 5;

// Leading list markers: digits, enumeration punctuation, bullets
static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\d.):\]\-*•·◦‣–—#]+").expect("valid regex")
});

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("No usable suggestions in response")]
    Empty,
}

/// Phrases shown to the child after a character reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionSet {
    Generated(Vec<String>),
    Fallback,
}

impl SuggestionSet {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }

    /// Exactly [`SUGGESTION_COUNT`] phrases.
    pub fn into_phrases(self) -> Vec<String> {
        match self {
            Self::Generated(phrases) => phrases,
            Self::Fallback => FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub struct SuggestionGenerator {
    llm: Arc<dyn LlmPort>,
    prompt: String,
}

impl SuggestionGenerator {
    /// `prompt` may contain `{scenario}` and `{reply}` placeholders.
    pub fn new(llm: Arc<dyn LlmPort>, prompt: impl Into<String>) -> Self {
        Self {
            llm,
            prompt: prompt.into(),
        }
    }

    /// Suggestions for the child's next turn, falling back on any fault.
    pub async fn suggest(&self, scenario: &str, character_reply: &str) -> SuggestionSet {
        match self.try_suggest(scenario, character_reply).await {
            Ok(phrases) => SuggestionSet::Generated(phrases),
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion generation failed, using fallback set");
                SuggestionSet::Fallback
            }
        }
    }

    pub async fn try_suggest(
        &self,
        scenario: &str,
        character_reply: &str,
    ) -> Result<Vec<String>, SuggestionError> {
        let reply: String = character_reply.chars().take(REPLY_PROMPT_CHARS).collect();
        let prompt = render(&self.prompt, &[("scenario", scenario), ("reply", &reply)]);

        let request = LlmRequest::new(vec![ChatMessage::user(prompt)]).with_temperature(0.8);
        let response = self.llm.generate(request).await?;

        let phrases = parse_suggestions(&response.content)?;
        tracing::debug!(count = phrases.len(), "Suggestions generated");
        Ok(phrases)
    }
}

/// Parse one phrase per line into a presentation set of exactly four.
pub fn parse_suggestions(content: &str) -> Result<Vec<String>, SuggestionError> {
    let candidates: Vec<String> = content
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .take(MAX_CANDIDATES)
        .collect();

    if candidates.is_empty() {
        return Err(SuggestionError::Empty);
    }

    Ok(pad_with_fallback(candidates))
}

fn clean_line(line: &str) -> String {
    let line = LIST_MARKER_RE.replace(line.trim(), "");
    line.trim()
        .trim_matches(|c: char| c == '"' || c == '“' || c == '”')
        .trim()
        .to_string()
}

fn pad_with_fallback(mut phrases: Vec<String>) -> Vec<String> {
    phrases.truncate(SUGGESTION_COUNT);
    for fallback in FALLBACK_SUGGESTIONS {
        if phrases.len() >= SUGGESTION_COUNT {
            break;
        }
        if !phrases.iter().any(|p| same_phrase(p, fallback)) {
            phrases.push(fallback.to_string());
        }
    }
    phrases
}

/// Case-insensitive match ignoring trailing punctuation ("Hi" == "hi!").
fn same_phrase(a: &str, b: &str) -> bool {
    let key = |s: &str| {
        s.trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .to_lowercase()
    };
    key(a) == key(b)
}
