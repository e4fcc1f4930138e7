//! Shared test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::ScriptedLlm;
//!
//! let llm = ScriptedLlm::new().then_reply("PASS").then_reply("Hi! [HAPPY]");
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;

use socialsim_domain::{ChatTurn, Mood};

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

// =============================================================================
// Scripted LLM
// =============================================================================

/// LLM double that answers from a fixed script and records every request.
///
/// Calls past the end of the script fail with `LlmError::RequestFailed`.
#[derive(Default)]
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that answers each call with the next reply in order.
    pub fn replying(replies: &[&str]) -> Self {
        replies
            .iter()
            .fold(Self::new(), |llm, reply| llm.then_reply(*reply))
    }

    pub fn then_reply(self, content: impl Into<String>) -> Self {
        self.push(Ok(LlmResponse::text(content)))
    }

    pub fn then_fail(self, error: LlmError) -> Self {
        self.push(Err(error))
    }

    fn push(self, step: Result<LlmResponse, LlmError>) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(step);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock poisoned").len()
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }
}

#[async_trait]
impl LlmPort for ScriptedLlm {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request);
        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::RequestFailed("script exhausted".into())))
    }
}

// =============================================================================
// Conversation builders
// =============================================================================

/// Alternating child/character turns numbered from 0, oldest first.
pub fn alternating_turns(count: usize) -> Vec<ChatTurn> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                ChatTurn::child(format!("child turn {i}"))
            } else {
                ChatTurn::character(format!("character turn {i}"), Mood::Neutral)
            }
        })
        .collect()
}

// =============================================================================
// HTTP stub server
// =============================================================================

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}
