//! Infrastructure: ports, LLM provider clients, and system adapters.

pub mod circuit_breaker;
pub mod clock;
pub mod gateway;
pub mod gemini;
pub mod ollama;
pub mod ports;
pub mod settings;
pub mod tiered_llm;
