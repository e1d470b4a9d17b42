//! find_places tool - look up venues near the event location

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError};

/// Find nearby venues for the event
pub struct FindPlacesTool;

#[async_trait]
impl Tool for FindPlacesTool {
    fn name(&self) -> &'static str {
        "find_places"
    }

    fn description(&self) -> &'static str {
        "Find nearby venues for the event. Searches by brand name when one was \
         requested, otherwise by venue type."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Region or locality to search within"
                },
                "query_type": {
                    "type": "string",
                    "description": "Kind of venue (restaurant, cafe, bar...); defaults to restaurant"
                },
                "brand_name": {
                    "type": "string",
                    "description": "Specific brand to search for instead of a venue type"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let location = input
            .get("location")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArgument("location is required".to_string()))?;

        let query_type = input
            .get("query_type")
            .and_then(|v| v.as_str())
            .unwrap_or("restaurant");

        // Brand takes precedence over the generic venue type
        let query = input
            .get("brand_name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(query_type);

        debug!(session_id = %ctx.session_id, %query, %location, "execute: searching places");
        let places = ctx.places.search(query, location).await?;

        Ok(json!({ "nearby_places": places }))
    }
}
