//! Feasible-slot generation
//!
//! Enumerates fixed-length time windows within a date range and the
//! configured working hours. The engine itself is a pure function of its
//! inputs - date ordering and duration validation happen in
//! [`validate_range`] before it is ever invoked.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ScheduleError;

/// Working-hours window slots are tiled into, in whole hours of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: u32,
    pub end: u32,
}

impl WorkingHours {
    /// Length of the window in hours
    pub fn span_hours(&self) -> f64 {
        f64::from(self.end.saturating_sub(self.start))
    }
}

/// A contiguous candidate time window for holding the event
///
/// Immutable once produced; identified by the (date, start, end) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

/// Serialize times as "HH:MM", the wire format tools and prompts use
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Parse a YYYY-MM-DD date string
pub fn parse_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate {
        value: value.to_string(),
    })
}

/// Validate slot-generation inputs before invoking the engine
///
/// The engine assumes ordered dates and a positive duration; callers must
/// reject bad inputs here first.
pub fn validate_range(start: NaiveDate, end: NaiveDate, duration_hours: f64) -> Result<(), ScheduleError> {
    if duration_hours <= 0.0 {
        return Err(ScheduleError::NonPositiveDuration { hours: duration_hours });
    }
    if start > end {
        return Err(ScheduleError::StartAfterEnd { start, end });
    }
    Ok(())
}

/// Enumerate feasible slots for every day from `start` to `end` inclusive
///
/// Each day's working window is tiled back-to-back from `work-start`,
/// stopping as soon as the next slot's end would pass `work-end`. A duration
/// longer than the window yields zero slots for that day. Output is
/// day-major, time-ascending - the selector's first-match semantics depend
/// on this ordering.
pub fn generate_feasible_slots(
    start: NaiveDate,
    end: NaiveDate,
    duration_hours: f64,
    hours: &WorkingHours,
) -> Vec<Slot> {
    let duration_minutes = (duration_hours * 60.0).round() as u32;
    let work_start = hours.start * 60;
    let work_end = hours.end * 60;

    let mut slots = Vec::new();
    let mut date = start;
    loop {
        let mut slot_start = work_start;
        while slot_start + duration_minutes <= work_end {
            let slot_end = slot_start + duration_minutes;
            slots.push(Slot {
                date,
                start_time: time_from_minutes(slot_start),
                end_time: time_from_minutes(slot_end),
            });
            slot_start = slot_end;
        }

        if date >= end {
            break;
        }
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    slots
}

fn time_from_minutes(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn hours(start: u32, end: u32) -> WorkingHours {
        WorkingHours { start, end }
    }

    #[test]
    fn test_single_day_two_hour_slots() {
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-10"), 2.0, &hours(9, 18));

        // 09-11, 11-13, 13-15, 15-17; a fifth slot 17-19 would pass 18:00
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slots[0].end_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert_eq!(slots[3].start_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(slots[3].end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn test_slot_count_per_day() {
        let work = hours(9, 18);
        for duration in [1u32, 2, 3, 4] {
            let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-10"), f64::from(duration), &work);
            assert_eq!(slots.len() as u32, (work.end - work.start) / duration, "duration {duration}");
        }
    }

    #[test]
    fn test_slots_stay_within_working_hours() {
        let work = hours(11, 22);
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-12"), 3.0, &work);

        for slot in &slots {
            assert!(slot.start_time >= NaiveTime::from_hms_opt(11, 0, 0).unwrap());
            assert!(slot.end_time <= NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        }
    }

    #[test]
    fn test_same_day_slots_are_contiguous() {
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-10"), 2.0, &hours(9, 18));

        for pair in slots.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
    }

    #[test]
    fn test_multi_day_visits_every_day_in_order() {
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-12"), 4.0, &hours(9, 18));

        // floor(9 / 4) = 2 slots per day, three days
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].date, date("2025-07-10"));
        assert_eq!(slots[2].date, date("2025-07-11"));
        assert_eq!(slots[4].date, date("2025-07-12"));
    }

    #[test]
    fn test_duration_exceeding_window_yields_no_slots() {
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-11"), 10.0, &hours(9, 18));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_fractional_duration() {
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-10"), 1.5, &hours(9, 18));

        // floor(9 / 1.5) = 6 slots
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[1].start_time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(slots[1].end_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_idempotent() {
        let a = generate_feasible_slots(date("2025-07-10"), date("2025-07-12"), 2.0, &hours(9, 18));
        let b = generate_feasible_slots(date("2025-07-10"), date("2025-07-12"), 2.0, &hours(9, 18));
        assert_eq!(a, b);
    }

    #[test]
    fn test_slot_wire_format() {
        let slots = generate_feasible_slots(date("2025-07-10"), date("2025-07-10"), 2.0, &hours(9, 18));
        let json = serde_json::to_value(&slots[0]).unwrap();

        assert_eq!(json["date"], "2025-07-10");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "11:00");

        let back: Slot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slots[0]);
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        assert!(parse_date("2025-07-10").is_ok());
        assert!(parse_date("2025-13-10").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(date("2025-07-10"), date("2025-07-11"), 2.0).is_ok());
        assert!(matches!(
            validate_range(date("2025-07-12"), date("2025-07-10"), 2.0),
            Err(ScheduleError::StartAfterEnd { .. })
        ));
        assert!(matches!(
            validate_range(date("2025-07-10"), date("2025-07-11"), 0.0),
            Err(ScheduleError::NonPositiveDuration { .. })
        ));
        assert!(matches!(
            validate_range(date("2025-07-10"), date("2025-07-11"), -1.0),
            Err(ScheduleError::NonPositiveDuration { .. })
        ));
    }
}
