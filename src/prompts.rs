//! System prompt construction
//!
//! The planning prompt is rendered from the registered tool definitions,
//! so the reasoning service only ever sees tools the session can actually
//! dispatch.

use crate::tools::ToolDefinition;

/// Build the planning system prompt for a tool set
pub fn system_prompt(tools: &[ToolDefinition]) -> String {
    let mut prompt = String::from(
        "You are an event planning agent.\n\
         Decide one next step at a time and express it as a single valid JSON object \
         with double quotes and no extra text, explanation, or markdown.\n\
         A step is either a tool call: {\"tool\": \"<name>\", \"args\": {...}}\n\
         or, when the plan is complete: {\"tool\": \"finish\", \"args\": {\"result\": \"<final plan text>\"}}.\n\
         If you need information only the user can provide, ask in plain text instead.\n\n\
         Available tools:\n",
    );

    for tool in tools {
        prompt.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        prompt.push_str(&format!("  parameters: {}\n", tool.input_schema));
    }

    prompt.push_str(
        "\nExample: {\"tool\": \"parse_intent\", \"args\": {\"user_input\": \"Plan dinner tomorrow in Malad\"}}",
    );

    prompt
}
