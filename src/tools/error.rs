//! Tool error types

use thiserror::Error;

use crate::llm::LlmError;
use crate::places::PlaceError;
use crate::schedule::ScheduleError;

/// Errors that can occur during tool dispatch and execution
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Intent extraction produced no usable structure: {detail}")]
    ParseFailure { detail: String },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Places(#[from] PlaceError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}
