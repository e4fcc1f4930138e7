//! LLM client wrapper that bounds every call with a deadline
//!
//! Wraps any LlmPort implementation. An elapsed deadline becomes
//! `LlmError::Timeout` and the in-flight call is dropped. There is exactly
//! one attempt per call; callers decide what a fault means for them.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// Default per-call deadline.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(15);

/// Wrapper that adds a per-call timeout to any LLM client
pub struct TimeoutLlmClient {
    inner: Arc<dyn LlmPort>,
    timeout: Duration,
}

impl TimeoutLlmClient {
    /// Create a new timeout wrapper around an existing LLM client
    pub fn new(inner: Arc<dyn LlmPort>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl LlmPort for TimeoutLlmClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        match tokio::time::timeout(self.timeout, self.inner.generate(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "LLM request timed out"
                );
                Err(LlmError::Timeout(self.timeout))
            }
        }
    }
}
