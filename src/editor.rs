//! Pure edit operations on week schedules.
//!
//! Every operation takes the current schedule by reference and returns a
//! new one; the input is never modified. An edit that would break a
//! schedule invariant is rejected with an [`EditError`] and nothing is
//! applied. A schedule that already breaks an invariant is refused by
//! every edit with [`EditError::InvalidSchedule`].
//!
//! # Invariants Kept
//! - A weekday belongs to at most one group; groups are never empty.
//! - A full-day group has no opening and no breaks.
//! - Breaks lie strictly inside the opening, never touch each other and
//!   are ordered by their offset from the opening start.

use crate::error::EditError;
use crate::models::{DaySchedule, TimeRange, WeekSchedule, Weekday, WeekdaySet};
use crate::validation::validate_schedule;

/// Text form of [`default_schedule`].
pub const DEFAULT_SCHEDULE: &str = "Mo-Fr 09:00-18:00";

/// A fresh schedule for a new facility: weekdays from 09:00 to 18:00.
pub fn default_schedule() -> WeekSchedule {
    WeekSchedule::new().with_group(DaySchedule::open(
        WeekdaySet::range(Weekday::Monday, Weekday::Friday),
        TimeRange::hm((9, 0), (18, 0)),
    ))
}

/// Adds `day` to group `group`.
///
/// A no-op when the group already has the day.
pub fn add_working_day(
    schedule: &WeekSchedule,
    group: usize,
    day: Weekday,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, group)?;
    match schedule.group_index_for(day) {
        Some(owner) if owner == group => return Ok(schedule.clone()),
        Some(owner) => return Err(EditError::DayAlreadyAssigned { day, owner }),
        None => {}
    }

    let mut next = schedule.clone();
    next.groups[group].weekdays.insert(day);
    Ok(next)
}

/// Removes `day` from group `group`. A group left without days is dropped.
pub fn remove_working_day(
    schedule: &WeekSchedule,
    group: usize,
    day: Weekday,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, group)?;
    let mut next = schedule.clone();
    if !next.groups[group].weekdays.remove(day) {
        return Err(EditError::DayNotInGroup { day, group });
    }
    if next.groups[group].weekdays.is_empty() {
        next.groups.remove(group);
    }
    Ok(next)
}

/// Sets the opening of group `group`.
///
/// Clears the full-day flag. Breaks that no longer fit strictly inside
/// the new opening are dropped.
pub fn set_opening_time(
    schedule: &WeekSchedule,
    group: usize,
    range: TimeRange,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, group)?;
    if !range.is_valid() {
        return Err(EditError::InvalidRange(range));
    }

    let mut next = schedule.clone();
    let target = &mut next.groups[group];
    target.is_full_day = false;
    target.opening = Some(range);

    let breaks = std::mem::take(&mut target.closed_breaks);
    for b in breaks {
        // Survivors were pairwise disjoint before, so only containment can fail.
        if target.fits_break(&b) {
            target.closed_breaks.push(b);
        }
    }
    let origin = range.start.minute_of_day();
    target
        .closed_breaks
        .sort_by_key(|b| b.span_after(origin).start);
    Ok(next)
}

/// Switches group `group` to open all day (`true`) or back to a timed
/// rule without an opening yet (`false`).
///
/// Turning full day on discards the opening and all breaks. Turning it
/// off leaves the group closed until [`set_opening_time`] is called; on a
/// group that is not full day it changes nothing.
///
/// Returns a `Result` like the other edits rather than a bare schedule:
/// the group index can be out of range ([`EditError::GroupOutOfRange`])
/// and the input can already be invalid ([`EditError::InvalidSchedule`]).
/// No other error occurs.
pub fn set_full_day(
    schedule: &WeekSchedule,
    group: usize,
    full_day: bool,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, group)?;
    let mut next = schedule.clone();
    let target = &mut next.groups[group];
    if full_day {
        target.is_full_day = true;
        target.opening = None;
        target.closed_breaks.clear();
    } else if target.is_full_day {
        target.is_full_day = false;
    }
    Ok(next)
}

/// Adds a closed break to group `group`.
pub fn add_closed_break(
    schedule: &WeekSchedule,
    group: usize,
    range: TimeRange,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, group)?;
    let mut next = schedule.clone();
    insert_break(&mut next.groups[group], group, range)?;
    Ok(next)
}

/// Removes the break at position `index` of group `group`.
pub fn remove_closed_break(
    schedule: &WeekSchedule,
    group: usize,
    index: usize,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, group)?;
    let len = schedule.groups[group].closed_breaks.len();
    if index >= len {
        return Err(EditError::BreakOutOfRange { index, len });
    }
    let mut next = schedule.clone();
    next.groups[group].closed_breaks.remove(index);
    Ok(next)
}

/// Appends a new group.
///
/// The group must cover at least one day not owned by another group. Its
/// opening and breaks go through the same checks as the single-field
/// edits; a full-day group keeps neither.
pub fn append_group(
    schedule: &WeekSchedule,
    group: DaySchedule,
) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    if group.weekdays.is_empty() {
        return Err(EditError::EmptyGroup);
    }
    for day in group.weekdays.iter() {
        if let Some(owner) = schedule.group_index_for(day) {
            return Err(EditError::DayAlreadyAssigned { day, owner });
        }
    }

    let index = schedule.len();
    let mut added = DaySchedule {
        weekdays: group.weekdays,
        opening: None,
        closed_breaks: Vec::new(),
        is_full_day: group.is_full_day,
    };
    if !group.is_full_day {
        if let Some(opening) = group.opening {
            if !opening.is_valid() {
                return Err(EditError::InvalidRange(opening));
            }
            added.opening = Some(opening);
            for range in group.closed_breaks {
                insert_break(&mut added, index, range)?;
            }
        } else if let Some(range) = group.closed_breaks.first() {
            return Err(EditError::BreakOutsideOpening {
                range: *range,
                group: index,
            });
        }
    }

    let mut next = schedule.clone();
    next.groups.push(added);
    Ok(next)
}

/// Removes group `index`; its days become closed.
pub fn remove_group(schedule: &WeekSchedule, index: usize) -> Result<WeekSchedule, EditError> {
    check_schedule(schedule)?;
    check_group(schedule, index)?;
    let mut next = schedule.clone();
    next.groups.remove(index);
    Ok(next)
}

/// A closed group covering every weekday no group owns.
///
/// The result is a candidate for [`append_group`]; its weekday set is
/// empty when the week is fully claimed. This is a read-only query, so it
/// does not check the schedule; [`append_group`] does.
pub fn compute_complement(schedule: &WeekSchedule) -> DaySchedule {
    DaySchedule::closed(schedule.unclaimed_days())
}

fn check_schedule(schedule: &WeekSchedule) -> Result<(), EditError> {
    validate_schedule(schedule).map_err(EditError::InvalidSchedule)
}

fn check_group(schedule: &WeekSchedule, index: usize) -> Result<(), EditError> {
    if index < schedule.len() {
        Ok(())
    } else {
        Err(EditError::GroupOutOfRange {
            index,
            len: schedule.len(),
        })
    }
}

/// Inserts a break in offset order after checking it against the group.
fn insert_break(target: &mut DaySchedule, group: usize, range: TimeRange) -> Result<(), EditError> {
    if target.is_full_day {
        return Err(EditError::FullDay(group));
    }
    let Some(opening) = target.opening else {
        return Err(EditError::NoOpeningTime(group));
    };
    if !range.is_valid() {
        return Err(EditError::InvalidRange(range));
    }
    if !target.fits_break(&range) {
        return Err(EditError::BreakOutsideOpening { range, group });
    }

    let origin = opening.start.minute_of_day();
    let span = range.span_after(origin);
    if target
        .closed_breaks
        .iter()
        .any(|b| b.span_after(origin).touches(&span))
    {
        return Err(EditError::BreakOverlap { range, group });
    }

    let position = target
        .closed_breaks
        .iter()
        .position(|b| b.span_after(origin).start > span.start)
        .unwrap_or(target.closed_breaks.len());
    target.closed_breaks.insert(position, range);
    Ok(())
}
