//! Deterministic scheduling core
//!
//! Slot enumeration and selection are pure functions - all I/O and
//! model-driven behavior lives above them in the tool layer.

mod error;
mod select;
mod slots;

pub use error::ScheduleError;
pub use select::select_slot;
pub use slots::{Slot, WorkingHours, generate_feasible_slots, parse_date, validate_range};
