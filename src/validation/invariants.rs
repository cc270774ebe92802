//! Structural integrity checks for week schedules.
//!
//! Detects:
//! - Weekdays owned by more than one group
//! - Groups without weekdays
//! - Out-of-range or zero-length time ranges
//! - Closed breaks outside the opening, or overlapping each other
//!
//! Schedules built by the parser and the editor always pass. A failure
//! means the value was assembled by other means and is reported, never
//! repaired.

use super::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::models::{DaySchedule, WeekSchedule, WeekdaySet};

/// Validates the invariants of a week schedule.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule(schedule: &WeekSchedule) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = WeekdaySet::empty();

    for (index, group) in schedule.groups.iter().enumerate() {
        if group.weekdays.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyGroup,
                format!("Group {index} covers no weekday"),
            ));
        }

        for day in group.weekdays.iter() {
            if !seen.insert(day) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateWeekday,
                    format!("{day} is assigned to more than one group (again in group {index})"),
                ));
            }
        }

        if !group.is_full_day {
            check_ranges(index, group, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ranges(index: usize, group: &DaySchedule, errors: &mut Vec<ValidationError>) {
    let Some(opening) = group.opening else {
        if !group.closed_breaks.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BreakOutsideOpening,
                format!("Group {index} has closed breaks but no opening time"),
            ));
        }
        return;
    };

    if !opening.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRange,
            format!("Group {index} has invalid opening {opening}"),
        ));
        // Break checks are meaningless against a broken opening.
        return;
    }

    for range in &group.closed_breaks {
        if !range.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRange,
                format!("Group {index} has invalid break {range}"),
            ));
        } else if !group.fits_break(range) {
            errors.push(ValidationError::new(
                ValidationErrorKind::BreakOutsideOpening,
                format!("Break {range} is not strictly inside opening {opening} of group {index}"),
            ));
        }
    }

    let spans = group.break_spans();
    if spans.windows(2).any(|pair| pair[0].touches(&pair[1])) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OverlappingBreaks,
            format!("Group {index} has overlapping closed breaks"),
        ));
    }
}
