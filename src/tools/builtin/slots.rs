//! generate_slots tool - enumerate feasible time slots

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::schedule::{generate_feasible_slots, parse_date, validate_range};
use crate::tools::{Tool, ToolContext, ToolError};

/// Generate feasible time slots between two dates
pub struct GenerateSlotsTool;

#[async_trait]
impl Tool for GenerateSlotsTool {
    fn name(&self) -> &'static str {
        "generate_slots"
    }

    fn description(&self) -> &'static str {
        "Generate feasible time slots for the event between start_date and end_date, \
         within working hours."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "start_date": {
                    "type": "string",
                    "description": "Start date in YYYY-MM-DD format"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date in YYYY-MM-DD format; defaults to start_date"
                },
                "duration_hours": {
                    "type": "number",
                    "description": "Event duration in hours; defaults to 1"
                }
            },
            "required": ["start_date"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let start_str = input
            .get("start_date")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArgument("start_date is required".to_string()))?;

        let start = parse_date(start_str)?;
        let end = match input.get("end_date").and_then(|v| v.as_str()) {
            Some(end_str) => parse_date(end_str)?,
            None => start,
        };

        let duration_hours = input.get("duration_hours").and_then(|v| v.as_f64()).unwrap_or(1.0);

        validate_range(start, end, duration_hours)?;
        let slots = generate_feasible_slots(start, end, duration_hours, &ctx.schedule.working_hours());

        Ok(json!({ "feasible_slots": slots }))
    }
}
