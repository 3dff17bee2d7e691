//! Engine configuration loaded from the environment.
//!
//! Missing credentials are a configuration state, not a crash: a `None`
//! Gemini key simply means the cloud tier is not built and everything runs
//! against the local fallback.

use std::time::Duration;

use crate::infrastructure::circuit_breaker::CircuitBreakerConfig;
use crate::infrastructure::gemini::DEFAULT_GEMINI_MODEL;
use crate::infrastructure::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Gemini API key. Absent means the cloud tier is disabled.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub breaker_failure_threshold: u32,
    pub breaker_open_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            breaker_failure_threshold: 3,
            breaker_open_secs: 60,
        }
    }
}

impl AppSettings {
    /// Load settings from the environment, falling back to defaults.
    ///
    /// Reads a `.env` file from the working directory first, where
    /// deployments usually keep `GOOGLE_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            gemini_api_key: std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            ollama_base_url: std::env::var("OLLAMA_URL")
                .or_else(|_| std::env::var("OLLAMA_BASE_URL"))
                .unwrap_or(defaults.ollama_base_url),
            ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            breaker_failure_threshold: env_u32(
                "LLM_BREAKER_FAILURES",
                defaults.breaker_failure_threshold,
            ),
            breaker_open_secs: env_u64("LLM_BREAKER_OPEN_SECS", defaults.breaker_open_secs),
        }
    }

    pub fn breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.breaker_failure_threshold,
            open_duration: Duration::from_secs(self.breaker_open_secs),
        }
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
