//! Slot selection heuristic
//!
//! Picks one slot from a candidate list based on keywords in the event
//! name. Priority-ordered first-match, not a scored ranking: only one
//! keyword category is tested per call, and ties break by input order.

use chrono::Timelike;
use tracing::debug;

use super::{ScheduleError, Slot};

/// Select the most suitable slot for the named event
///
/// "date" prefers evening slots (17:00 onwards), "lunch" prefers
/// 12:00-15:00 starts, "dinner" prefers starts from 19:00. When no keyword
/// matches, or the preferred window has no candidates, the first candidate
/// wins. Errors on an empty candidate list.
pub fn select_slot(event_name: &str, candidates: &[Slot]) -> Result<Slot, ScheduleError> {
    let first = candidates.first().ok_or(ScheduleError::EmptyCandidates)?;

    let name = event_name.to_lowercase();
    let preferred = if name.contains("date") {
        debug!(%event_name, "select_slot: evening preference");
        candidates.iter().find(|slot| slot.start_time.hour() >= 17)
    } else if name.contains("lunch") {
        debug!(%event_name, "select_slot: midday preference");
        candidates.iter().find(|slot| (12..15).contains(&slot.start_time.hour()))
    } else if name.contains("dinner") {
        debug!(%event_name, "select_slot: late-evening preference");
        candidates.iter().find(|slot| slot.start_time.hour() >= 19)
    } else {
        None
    };

    Ok(preferred.unwrap_or(first).clone())
}
