//! planagent - agentic event planning assistant
//!
//! A conversational planner that drives an external reasoning service
//! through a loop of tool calls - intent parsing, slot generation, slot
//! selection, venue lookup, budget estimation - until it emits a final
//! plan.
//!
//! # Modules
//!
//! - [`agent`] - the orchestration loop and action recovery
//! - [`tools`] - tool trait, registry and the builtin planning tools
//! - [`schedule`] - deterministic slot engine and selector
//! - [`llm`] - reasoning-service client
//! - [`places`] - venue lookup collaborator
//! - [`budget`] - deterministic budget estimation
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod agent;
pub mod budget;
pub mod cli;
pub mod config;
pub mod llm;
pub mod places;
pub mod prompts;
pub mod schedule;
pub mod tools;

// Re-export commonly used types
pub use agent::{CancelToken, PlanReport, PlanSummary, PlannerSession, SessionError, SessionOutcome, Turn};
pub use config::{Config, LlmConfig, SessionConfig};
pub use llm::{ChatRequest, ChatResponse, LlmClient, LlmError, Message};
pub use places::{Place, PlaceFinder};
pub use schedule::{ScheduleError, Slot, WorkingHours, generate_feasible_slots, select_slot};
pub use tools::{Tool, ToolContext, ToolError, ToolExecutor};
