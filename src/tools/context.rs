//! ToolContext - collaborators injected into tool execution

use std::sync::Arc;

use crate::config::{BudgetConfig, ScheduleConfig};
use crate::llm::LlmClient;
use crate::places::PlaceFinder;

/// Everything a tool may need at execution time
///
/// Built once per session and passed by reference into every dispatch, so
/// concurrent sessions never share collaborator state.
pub struct ToolContext {
    /// Session this context belongs to (for log correlation)
    pub session_id: String,

    /// Reasoning-service client (used by the intent parser)
    pub llm: Arc<dyn LlmClient>,

    /// Venue search collaborator
    pub places: Arc<dyn PlaceFinder>,

    /// Working-hours window for slot generation
    pub schedule: ScheduleConfig,

    /// Budget-estimation constants
    pub budget: BudgetConfig,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(
        session_id: String,
        llm: Arc<dyn LlmClient>,
        places: Arc<dyn PlaceFinder>,
        schedule: ScheduleConfig,
        budget: BudgetConfig,
    ) -> Self {
        Self {
            session_id,
            llm,
            places,
            schedule,
            budget,
        }
    }
}
