//! Canonical text output for week schedules.
//!
//! # Output Form
//! - Groups in schedule order, joined by `"; "`.
//! - Day lists Monday first; three or more consecutive days collapse to
//!   `Mo-Fr`, shorter runs stay comma separated (`Sa,Su`).
//! - A week that is open around the clock on every day is `24/7`. Other
//!   full-day groups read `<days> open`, closed groups `<days> off`.
//! - Timed groups list their open segments as zero-padded `HH:MM-HH:MM`.
//!   A segment ending at midnight ends in `24:00`, one crossing midnight
//!   is written overnight (`22:00-02:00`), one lying wholly after
//!   midnight uses extended hours (`25:00-28:00`).
//!
//! Text produced here parses back into an equivalent schedule, provided
//! the schedule passes [`validate_schedule`]. [`serialize_checked`]
//! refuses schedules that do not.

use std::fmt;

use crate::models::{DaySchedule, MinuteSpan, WeekSchedule, Weekday, WeekdaySet, MINUTES_PER_DAY};
use crate::parser::TWENTY_FOUR_SEVEN;
use crate::validation::{validate_schedule, ValidationError};

/// Text for a schedule with no open day.
const ALWAYS_CLOSED: &str = "off";

/// Renders a schedule as canonical text.
///
/// The input must pass [`validate_schedule`]. Any schedule is rendered,
/// but for one that breaks an invariant (a weekday in two groups, a break
/// outside the opening) the text is not guaranteed to parse back to an
/// equivalent schedule. Use [`serialize_checked`] when the input is not
/// known to be valid.
///
/// # Examples
///
/// ```
/// use u_opening_hours::{parse, serialize};
///
/// let schedule = parse("Sa,Mo-Fr 9-13,14-18").unwrap();
/// assert_eq!(serialize(&schedule), "Mo-Sa 09:00-13:00,14:00-18:00");
/// ```
pub fn serialize(schedule: &WeekSchedule) -> String {
    if schedule.is_twenty_four_seven() {
        return TWENTY_FOUR_SEVEN.to_string();
    }

    let rules: Vec<String> = schedule
        .groups
        .iter()
        .filter(|g| !g.weekdays.is_empty())
        .map(serialize_group)
        .collect();

    if rules.is_empty() {
        ALWAYS_CLOSED.to_string()
    } else {
        rules.join("; ")
    }
}

/// Renders a schedule after checking its invariants.
///
/// # Errors
/// Every violated invariant, as reported by [`validate_schedule`].
pub fn serialize_checked(schedule: &WeekSchedule) -> Result<String, Vec<ValidationError>> {
    validate_schedule(schedule)?;
    Ok(serialize(schedule))
}

impl fmt::Display for WeekSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

fn serialize_group(group: &DaySchedule) -> String {
    let days = format_days(&group.weekdays);
    if group.is_full_day {
        return format!("{days} open");
    }
    let segments = group.open_segments();
    if segments.is_empty() {
        return format!("{days} {ALWAYS_CLOSED}");
    }
    let times: Vec<String> = segments.iter().map(format_segment).collect();
    format!("{days} {}", times.join(","))
}

/// Formats a day set as runs (`Mo-Fr`) and single days (`Sa,Su`).
pub(crate) fn format_days(days: &WeekdaySet) -> String {
    let mut runs: Vec<(Weekday, Weekday)> = Vec::new();
    for day in days.iter() {
        match runs.last_mut() {
            Some((_, last)) if last.index() + 1 == day.index() => *last = day,
            _ => runs.push((day, day)),
        }
    }

    let mut parts: Vec<String> = Vec::with_capacity(runs.len());
    for (first, last) in runs {
        match last.index() - first.index() {
            0 => parts.push(first.token().to_string()),
            1 => {
                parts.push(first.token().to_string());
                parts.push(last.token().to_string());
            }
            _ => parts.push(format!("{first}-{last}")),
        }
    }
    parts.join(",")
}

fn format_segment(segment: &MinuteSpan) -> String {
    let start = segment.start;
    // Only a segment crossing midnight wraps; one wholly after midnight
    // stays in extended hours.
    let end = if start < MINUTES_PER_DAY && segment.end > MINUTES_PER_DAY {
        segment.end - MINUTES_PER_DAY
    } else {
        segment.end
    };
    format!(
        "{:02}:{:02}-{:02}:{:02}",
        start / 60,
        start % 60,
        end / 60,
        end % 60
    )
}
