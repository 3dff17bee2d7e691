//! Tiered LLM client with per-provider circuit breaking.
//!
//! Providers are tried in configuration order (cloud first, local fallback).
//! A tier whose circuit is open is skipped; the first success wins. The
//! default chain runs Gemini as tier 1 and a local Ollama as tier 2.

use async_trait::async_trait;
use std::sync::Arc;

use crate::infrastructure::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// One provider in the fallback chain.
pub struct LlmTier {
    client: Arc<dyn LlmPort>,
    breaker: CircuitBreaker,
}

impl LlmTier {
    pub fn new(client: Arc<dyn LlmPort>) -> Self {
        Self {
            client,
            breaker: CircuitBreaker::default(),
        }
    }

    pub fn with_breaker(client: Arc<dyn LlmPort>, config: CircuitBreakerConfig) -> Self {
        Self {
            client,
            breaker: CircuitBreaker::new(config),
        }
    }
}

/// Ordered provider list behind a single [`LlmPort`].
pub struct TieredLlmClient {
    tiers: Vec<LlmTier>,
}

impl TieredLlmClient {
    pub fn new(tiers: Vec<LlmTier>) -> Self {
        Self { tiers }
    }
}

#[async_trait]
impl LlmPort for TieredLlmClient {
    fn provider_name(&self) -> &str {
        "tiered"
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut last_error = None;

        for tier in &self.tiers {
            let provider = tier.client.provider_name();

            if !tier.breaker.allow_request() {
                tracing::debug!(provider, "circuit open, skipping tier");
                continue;
            }

            match tier.client.generate(request.clone()).await {
                Ok(response) => {
                    tier.breaker.record_success();
                    return Ok(response);
                }
                Err(e) => {
                    tier.breaker.record_failure();
                    tracing::warn!(provider, error = %e, "LLM tier failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::NotConfigured("no LLM providers available".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingLlm, ScriptedLlm};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[tokio::test]
    async fn first_tier_success_short_circuits() {
        let first = Arc::new(ScriptedLlm::replies(["{\"ok\":1}"]));
        let second = Arc::new(CountingLlm::always_fail());
        let second_calls = Arc::clone(&second);

        let client =
            TieredLlmClient::new(vec![LlmTier::new(first), LlmTier::new(second)]);

        let result = client.generate(LlmRequest::new("prompt")).await;
        assert!(result.is_ok());
        assert_eq!(second_calls.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_back_to_the_next_tier() {
        let first = Arc::new(CountingLlm::always_fail());
        let second = Arc::new(ScriptedLlm::replies(["{\"ok\":2}"]));

        let client =
            TieredLlmClient::new(vec![LlmTier::new(first), LlmTier::new(second)]);

        let result = client.generate(LlmRequest::new("prompt")).await;
        assert_eq!(result.map(|r| r.content), Ok("{\"ok\":2}".to_string()));
    }

    #[tokio::test]
    async fn all_tiers_failing_returns_the_last_error() {
        let client = TieredLlmClient::new(vec![
            LlmTier::new(Arc::new(CountingLlm::always_fail())),
            LlmTier::new(Arc::new(CountingLlm::always_fail())),
        ]);

        let result = client.generate(LlmRequest::new("prompt")).await;
        assert!(matches!(result, Err(LlmError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn empty_tier_list_is_not_configured() {
        let client = TieredLlmClient::new(vec![]);
        let result = client.generate(LlmRequest::new("prompt")).await;
        assert!(matches!(result, Err(LlmError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn open_circuit_skips_a_tier_entirely() {
        let failing = Arc::new(CountingLlm::always_fail());
        let failing_calls = Arc::clone(&failing);
        let fallback = Arc::new(ScriptedLlm::replies(["{\"a\":1}", "{\"b\":2}", "{\"c\":3}"]));

        let client = TieredLlmClient::new(vec![
            LlmTier::with_breaker(
                failing,
                CircuitBreakerConfig {
                    failure_threshold: 2,
                    open_duration: Duration::from_secs(600),
                },
            ),
            LlmTier::new(fallback),
        ]);

        for _ in 0..3 {
            let result = client.generate(LlmRequest::new("prompt")).await;
            assert!(result.is_ok());
        }

        // Two real attempts trip the breaker; the third request skips tier 1.
        assert_eq!(failing_calls.calls.load(Ordering::SeqCst), 2);
    }
}
