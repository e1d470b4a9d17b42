//! parse_intent tool - extract structured event details from free text

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::agent::extract_json;
use crate::schedule::{parse_date, validate_range};
use crate::tools::{Tool, ToolContext, ToolError};

/// The parsed planning intent
///
/// Produced once per session by this tool and treated as read-only input
/// by everything downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    pub event_name: String,
    #[serde(default = "default_duration")]
    pub duration_hours: f64,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub location: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default = "default_query_type")]
    pub query_type: String,
    #[serde(default = "default_people")]
    pub number_of_people: u32,
}

fn default_duration() -> f64 {
    1.0
}

fn default_query_type() -> String {
    "restaurant".to_string()
}

fn default_people() -> u32 {
    2
}

impl EventRequest {
    /// Check the invariants downstream tools rely on
    ///
    /// Date ordering and duration must be rejected here, before the slot
    /// engine ever sees them.
    pub fn validate(&self) -> Result<(), ToolError> {
        let start = parse_date(&self.start_date)?;
        let end = match &self.end_date {
            Some(end) => parse_date(end)?,
            None => start,
        };
        validate_range(start, end, self.duration_hours)?;
        Ok(())
    }
}

/// Extract structured event details from the user's request
pub struct ParseIntentTool;

impl ParseIntentTool {
    /// Render the extraction prompt for the reasoning service
    fn extraction_prompt(user_input: &str, today: NaiveDate) -> String {
        format!(
            r#"You are an event planner assistant. Today's date is {today}.

Extract from the user input:
- event_name: short name for the event
- duration_hours: event length in hours (default 1)
- start_date: absolute date in YYYY-MM-DD (resolve relative dates against today)
- end_date: same as start_date unless a range is mentioned
- location: the locality or region named
- brand_name: a specific brand if one is named (e.g. McDonald's), else omit
- query_type: kind of venue (bar, cafe, restaurant, pub, club...). Default "restaurant".
- number_of_people: number of guests (default 2)

Return only a single valid JSON object with exactly those keys and no other text.

User input: {user_input}"#
        )
    }
}

#[async_trait]
impl Tool for ParseIntentTool {
    fn name(&self) -> &'static str {
        "parse_intent"
    }

    fn description(&self) -> &'static str {
        "Parse the user's natural language request into structured event details \
         (event name, dates, duration, location, venue type, headcount). Call this first."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_input": {
                    "type": "string",
                    "description": "The user's event planning request, verbatim"
                }
            },
            "required": ["user_input"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let user_input = input
            .get("user_input")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArgument("user_input is required".to_string()))?;

        let today = chrono::Local::now().date_naive();
        let prompt = Self::extraction_prompt(user_input, today);

        let request = crate::llm::ChatRequest {
            messages: vec![crate::llm::Message::user(prompt)],
            max_tokens: 1024,
            temperature: 0.0,
        };

        let response = ctx.llm.complete(request).await?;
        debug!(session_id = %ctx.session_id, "execute: extraction reply received");

        let parsed = extract_json(&response.content).ok_or_else(|| ToolError::ParseFailure {
            detail: format!("no JSON object in model output: {}", truncate(&response.content, 200)),
        })?;

        let event: EventRequest = serde_json::from_value(parsed).map_err(|e| ToolError::ParseFailure {
            detail: e.to_string(),
        })?;
        event.validate()?;

        Ok(json!({ "event_request": event }))
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
