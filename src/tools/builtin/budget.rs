//! estimate_budget tool - estimate event cost

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::budget::estimate;
use crate::tools::{Tool, ToolContext, ToolError};

/// Estimate the event budget from headcount and location
pub struct EstimateBudgetTool;

#[async_trait]
impl Tool for EstimateBudgetTool {
    fn name(&self) -> &'static str {
        "estimate_budget"
    }

    fn description(&self) -> &'static str {
        "Estimate the event budget from the number of people and the location. \
         Pass venue names in `venues` for independent per-venue estimates."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "number_of_people": {
                    "type": "integer",
                    "description": "Number of guests attending; defaults to 1"
                },
                "location": {
                    "type": "string",
                    "description": "Event location for cost reference; defaults to unknown"
                },
                "venues": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Optional venue names for per-venue estimates"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let number_of_people = input.get("number_of_people").and_then(|v| v.as_u64()).unwrap_or(1) as u32;

        let location = input.get("location").and_then(|v| v.as_str()).unwrap_or("unknown");

        let mut result = serde_json::to_value(estimate(number_of_people, location, &ctx.budget))
            .map_err(|e| ToolError::InvalidArgument(e.to_string()))?;

        // Independent per-venue estimates, in request order
        if let Some(venues) = input.get("venues").and_then(|v| v.as_array()) {
            let per_venue: Vec<Value> = venues
                .iter()
                .filter_map(|v| v.as_str())
                .map(|venue| {
                    let venue_estimate = estimate(number_of_people, venue, &ctx.budget);
                    json!({
                        "venue": venue,
                        "total_budget": venue_estimate.total_budget,
                        "per_person_cost": venue_estimate.per_person_cost,
                        "currency": venue_estimate.currency,
                    })
                })
                .collect();
            result["per_venue"] = json!(per_venue);
        }

        Ok(json!({ "budget_estimate": result }))
    }
}
