//! select_slot tool - pick the best slot for the event

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::schedule::{Slot, select_slot};
use crate::tools::{Tool, ToolContext, ToolError};

/// Select the most suitable slot based on the event name
pub struct SelectSlotTool;

#[async_trait]
impl Tool for SelectSlotTool {
    fn name(&self) -> &'static str {
        "select_slot"
    }

    fn description(&self) -> &'static str {
        "Select the most suitable time slot for the event from previously generated \
         feasible_slots, using the event name to infer a preferred time of day."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "event_name": {
                    "type": "string",
                    "description": "Name of the event, used to infer the preferred time"
                },
                "feasible_slots": {
                    "type": "array",
                    "description": "Candidate slots from generate_slots, in generated order",
                    "items": {
                        "type": "object",
                        "properties": {
                            "date": { "type": "string" },
                            "start_time": { "type": "string" },
                            "end_time": { "type": "string" }
                        }
                    }
                }
            },
            "required": ["event_name", "feasible_slots"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<Value, ToolError> {
        let event_name = input
            .get("event_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArgument("event_name is required".to_string()))?;

        let candidates_value = input
            .get("feasible_slots")
            .cloned()
            .ok_or_else(|| ToolError::InvalidArgument("feasible_slots is required".to_string()))?;

        let candidates: Vec<Slot> = serde_json::from_value(candidates_value)
            .map_err(|e| ToolError::InvalidArgument(format!("feasible_slots is malformed: {e}")))?;

        let selected = select_slot(event_name, &candidates)?;

        Ok(json!({ "selected_slot": selected }))
    }
}
