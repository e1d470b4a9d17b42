//! ToolExecutor - the constructed tool registry for one session

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::builtin::{EstimateBudgetTool, FindPlacesTool, GenerateSlotsTool, ParseIntentTool, SelectSlotTool};
use super::{Tool, ToolContext, ToolDefinition, ToolError};

/// Maps tool names to implementations and dispatches calls
///
/// Explicitly constructed and handed to the session at start - there is no
/// process-wide registry, so concurrent sessions cannot share tool state.
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the standard planning tools
    pub fn standard() -> Self {
        let mut tools: HashMap<String, Box<dyn Tool>> = HashMap::new();

        tools.insert("parse_intent".into(), Box::new(ParseIntentTool));
        tools.insert("generate_slots".into(), Box::new(GenerateSlotsTool));
        tools.insert("select_slot".into(), Box::new(SelectSlotTool));
        tools.insert("find_places".into(), Box::new(FindPlacesTool));
        tools.insert("estimate_budget".into(), Box::new(EstimateBudgetTool));

        Self { tools }
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for the planning prompt
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        // HashMap iteration order is arbitrary; the prompt must be stable
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a named tool with the given arguments
    pub async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        debug!(%name, session_id = %ctx.session_id, "execute: called");
        match self.tools.get(name) {
            Some(tool) => tool.execute(args, ctx).await,
            None => Err(ToolError::UnknownTool { name: name.to_string() }),
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
