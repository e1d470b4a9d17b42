//! Reasoning-service client module
//!
//! Provides chat completion requests against the external reasoning service.

use std::sync::Arc;

use tracing::debug;

mod client;
mod error;
mod groq;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use groq::GroqClient;
pub use types::{ChatRequest, ChatResponse, Message, Role, TokenUsage};

#[cfg(test)]
pub use client::mock;

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// "groq" and "openai" both map to the OpenAI-compatible chat client.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "groq" | "openai" => {
            debug!("create_client: creating OpenAI-compatible client");
            Ok(Arc::new(GroqClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: groq, openai",
                other
            )))
        }
    }
}
