//! LlmClient trait definition

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, LlmError};

/// Client for the external reasoning service
///
/// The planner holds the conversation state itself and ships the full
/// history on every call, so the client is stateless: each request is
/// independent and self-contained.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request and block until the reply arrives
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;
}
