//! AI gateway: prompt in, validated JSON out.
//!
//! Every generative feature goes through here. The gateway appends a strict
//! JSON-only instruction, strips the Markdown code fences models love to wrap
//! JSON in, and parses before anything downstream gets to trust a field. It
//! returns typed errors and never panics across the boundary.

use regex_lite::Regex;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::LazyLock;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest};

// Models routinely wrap JSON in ```json ... ``` fences despite instructions
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("valid regex"));

/// Instruction suffix appended to every prompt.
const JSON_ONLY_SUFFIX: &str = "\n\nIMPORTANT: Return ONLY valid JSON. No markdown.";

/// The single entry point for generative calls.
pub struct AiGateway {
    llm: Arc<dyn LlmPort>,
}

impl AiGateway {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    /// Generate and parse a JSON value from the configured provider chain.
    pub async fn generate_json(&self, prompt: &str) -> Result<serde_json::Value, LlmError> {
        let request = LlmRequest::new(format!("{prompt}{JSON_ONLY_SUFFIX}"));
        let response = self.llm.generate(request).await?;

        let clean = strip_code_fences(&response.content);
        let value: serde_json::Value = serde_json::from_str(&clean)
            .map_err(|e| LlmError::InvalidResponse(format!("{e}: {clean}")))?;

        // Error sentinel: a provider (or a confused model) reporting failure
        // in-band rather than out-of-band
        if value.get("type").and_then(|t| t.as_str()) == Some("ERROR") {
            return Err(LlmError::InvalidResponse(
                "gateway returned the ERROR sentinel".to_string(),
            ));
        }

        Ok(value)
    }

    /// Generate and deserialize into an operation-specific schema.
    pub async fn generate<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let value = self.generate_json(prompt).await?;
        serde_json::from_value(value).map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

/// Remove ```json / ``` fences from a model reply.
fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").trim().to_string()
}
