//! Request/response types for the reasoning service
//!
//! The planner protocol is plain chat: ordered role-tagged messages in, free
//! text out. Structured actions are embedded in the reply text and recovered
//! by the agent layer, so there are no tool-use content blocks here.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A chat completion request - everything needed for one reasoning call
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Full conversation history, system message first
    pub messages: Vec<Message>,

    /// Max tokens for the response (from config)
    pub max_tokens: u32,

    /// Sampling temperature (from config)
    pub temperature: f32,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The model's reply text
    pub content: String,

    /// Token usage for cost tracking
    pub usage: TokenUsage,
}

/// Token usage for cost tracking
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Total tokens consumed by a request
    pub fn total(&self) -> u64 {
        debug!(%self.prompt_tokens, %self.completion_tokens, "TokenUsage::total: called");
        self.prompt_tokens + self.completion_tokens
    }
}
