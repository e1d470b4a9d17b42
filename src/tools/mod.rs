//! Tool system for planning sessions
//!
//! Tools are the units of work the reasoning service can request by name.
//! Each session gets its own explicitly constructed `ToolExecutor` and a
//! `ToolContext` carrying the collaborators tools need - nothing is shared
//! process-wide.

mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use traits::{Tool, ToolDefinition};
