//! Shared test doubles for the engine.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// LLM double that replays a fixed script of replies, in order.
///
/// Each call pops the next entry; an exhausted script fails the request,
/// which surfaces loudly in tests that under-budget their replies.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
}

impl ScriptedLlm {
    pub fn new(script: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Script of plain successful replies.
    pub fn replies<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.into())))
    }
}

#[async_trait]
impl LlmPort for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let next = self
            .script
            .lock()
            .map(|mut script| script.pop_front())
            .unwrap_or(None);
        match next {
            Some(Ok(content)) => Ok(LlmResponse { content }),
            Some(Err(e)) => Err(e),
            None => Err(LlmError::RequestFailed("script exhausted".to_string())),
        }
    }
}

/// LLM double that counts calls and always fails.
pub struct CountingLlm {
    pub calls: AtomicU32,
}

impl CountingLlm {
    pub fn always_fail() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl LlmPort for CountingLlm {
    fn provider_name(&self) -> &str {
        "counting"
    }

    async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::RequestFailed("simulated outage".to_string()))
    }
}
