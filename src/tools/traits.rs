//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;

use super::ToolError;
use super::context::ToolContext;

/// A unit of work the reasoning service can request by name
///
/// Each tool declares a parameter schema and a description; the planning
/// prompt is rendered from these, so the model only ever sees tools that
/// are actually registered.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the "tool" field of an action)
    fn name(&self) -> &'static str;

    /// Human-readable description consumed by the planning prompt
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    ///
    /// The Ok value is a JSON object with one well-known top-level key,
    /// merged into the session's accumulated results.
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError>;
}

/// A tool's name, description and schema, as shown to the reasoning service
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
