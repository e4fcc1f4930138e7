//! Engine configuration read from the environment.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::gemini::{GeminiClient, DEFAULT_GEMINI_MODEL};
use crate::infrastructure::openai_compat::{
    OpenAiCompatClient, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
use crate::infrastructure::ports::LlmPort;
use crate::infrastructure::timeout_llm::{TimeoutLlmClient, DEFAULT_LLM_TIMEOUT};

/// Errors raised while turning configuration into live clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
    #[error("Unknown LLM provider: {0}")]
    UnknownProvider(String),
}

/// Which text-generation backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProviderKind {
    #[default]
    Gemini,
    /// Any OpenAI-compatible endpoint, including Ollama
    OpenAiCompat,
}

impl FromStr for LlmProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "gemini" => Ok(Self::Gemini),
            "openai" | "ollama" | "openai_compat" => Ok(Self::OpenAiCompat),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Raw `LLM_PROVIDER` value, parsed when the client is built
    pub llm_provider: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
    pub analytics_db: String,
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let llm_timeout = var("LLM_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LLM_TIMEOUT);

        Self {
            llm_provider: var("LLM_PROVIDER").unwrap_or_else(|| "gemini".into()),
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            openai_base_url: var("OPENAI_BASE_URL")
                .or_else(|| var("OLLAMA_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            openai_model: var("OPENAI_MODEL")
                .or_else(|| var("OLLAMA_MODEL"))
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            openai_api_key: var("OPENAI_API_KEY"),
            llm_timeout,
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: var("SERVER_PORT")
                .or_else(|| var("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            analytics_db: var("ANALYTICS_DB").unwrap_or_else(|| "socialsim.db".into()),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        }
    }

    /// Build the configured LLM client, wrapped with the per-call timeout.
    pub fn build_llm(&self) -> Result<Arc<dyn LlmPort>, ConfigError> {
        let inner: Arc<dyn LlmPort> = match self.llm_provider.parse::<LlmProviderKind>()? {
            LlmProviderKind::Gemini => {
                let key = self.gemini_api_key.as_deref().unwrap_or_default();
                Arc::new(GeminiClient::new(key, &self.gemini_model)?)
            }
            LlmProviderKind::OpenAiCompat => Arc::new(
                OpenAiCompatClient::new(&self.openai_base_url, &self.openai_model)
                    .with_api_key(self.openai_api_key.clone()),
            ),
        };

        Ok(Arc::new(TimeoutLlmClient::new(inner, self.llm_timeout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.llm_provider, "gemini");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.openai_base_url, "http://localhost:11434");
        assert_eq!(config.llm_timeout, Duration::from_secs(15));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.analytics_db, "socialsim.db");
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn test_overrides_and_aliases() {
        let config = config_from(&[
            ("LLM_PROVIDER", "ollama"),
            ("OLLAMA_BASE_URL", "http://ollama:11434"),
            ("OLLAMA_MODEL", "qwen2.5"),
            ("LLM_TIMEOUT_SECS", "7"),
            ("PORT", "8080"),
        ]);
        assert_eq!(config.openai_base_url, "http://ollama:11434");
        assert_eq!(config.openai_model, "qwen2.5");
        assert_eq!(config.llm_timeout, Duration::from_secs(7));
        assert_eq!(config.server_port, 8080);
        assert!(config.build_llm().is_ok());
    }

    #[test]
    fn test_bad_timeout_falls_back_to_default() {
        let config = config_from(&[("LLM_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.llm_timeout, DEFAULT_LLM_TIMEOUT);
        let config = config_from(&[("LLM_TIMEOUT_SECS", "0")]);
        assert_eq!(config.llm_timeout, DEFAULT_LLM_TIMEOUT);
    }

    #[test]
    fn test_gemini_without_key_is_a_config_error() {
        let config = config_from(&[]);
        assert_eq!(
            config.build_llm().err(),
            Some(ConfigError::MissingApiKey("GEMINI_API_KEY"))
        );

        let config = config_from(&[("GEMINI_API_KEY", "YOUR_GEMINI_API_KEY")]);
        assert!(config.build_llm().is_err());

        let config = config_from(&[("GEMINI_API_KEY", "abc123")]);
        assert!(config.build_llm().is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        let config = config_from(&[("LLM_PROVIDER", "carrier-pigeon")]);
        assert!(matches!(
            config.build_llm(),
            Err(ConfigError::UnknownProvider(p)) if p == "carrier-pigeon"
        ));
    }
}
