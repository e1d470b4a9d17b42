//! Action recovery from reasoning-service output
//!
//! The reasoning service is asked to emit a single JSON action object, but
//! is not contractually guaranteed to: replies may wrap the object in
//! prose, or contain no object at all. Extraction is therefore best-effort
//! scanning for a balanced brace-delimited block; callers treat a miss as
//! a conversational reply, never as a fault.

use serde_json::Value;
use tracing::debug;

/// The terminal action name
pub const FINISH_TOOL: &str = "finish";

/// A structured action recovered from a reply
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// Invoke a named tool with the given arguments
    ToolCall { tool: String, args: Value },

    /// The plan is complete; `result` is the carried payload
    Finish { result: Value },
}

impl AgentAction {
    /// Recover an action from free text, if one is present
    ///
    /// Returns None when no JSON object can be extracted or the object
    /// has no "tool" field - both mean the reply is conversational.
    pub fn from_text(text: &str) -> Option<AgentAction> {
        let value = extract_json(text)?;

        let tool = value.get("tool").and_then(|v| v.as_str())?.to_string();
        let args = value.get("args").cloned().unwrap_or_else(|| Value::Object(Default::default()));

        if tool == FINISH_TOOL {
            debug!("from_text: finish action");
            let result = args.get("result").cloned().unwrap_or(Value::Null);
            return Some(AgentAction::Finish { result });
        }

        debug!(%tool, "from_text: tool call");
        Some(AgentAction::ToolCall { tool, args })
    }
}

/// Extract the first parseable JSON object embedded in text
///
/// Scans for balanced brace blocks, skipping braces inside string
/// literals. A block that balances but fails to parse does not abort the
/// scan - later candidates are still tried.
pub fn extract_json(text: &str) -> Option<Value> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find('{') {
        let open = search_from + rel;
        if let Some(len) = balanced_block_len(&text[open..]) {
            let candidate = &text[open..open + len];
            match serde_json::from_str::<Value>(candidate) {
                Ok(value) if value.is_object() => return Some(value),
                Ok(_) | Err(_) => {
                    debug!("extract_json: balanced block failed to parse, continuing scan");
                }
            }
        }
        search_from = open + 1;
    }
    None
}

/// Byte length of the balanced block starting at the leading '{'
fn balanced_block_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }

    None
}
