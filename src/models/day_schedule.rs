//! Day-group model: a set of weekdays sharing one time rule.
//!
//! # Rule Forms
//! - **Full day**: `is_full_day` is set; opening and breaks are ignored.
//! - **Closed**: no opening and not full day (the `off` form).
//! - **Timed**: an opening range, optionally minus closed breaks.
//!
//! Closed breaks lie strictly inside the opening (overnight aware) and never
//! touch each other. They are kept ordered by their offset from the opening
//! start.

use serde::{Deserialize, Serialize};

use super::time::{MinuteSpan, TimeRange, MINUTES_PER_DAY};
use super::weekday::{Weekday, WeekdaySet};

/// One day-group of a week schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySchedule {
    /// Days this rule applies to.
    pub weekdays: WeekdaySet,
    /// Opening interval. `None` on a closed or full-day group.
    pub opening: Option<TimeRange>,
    /// Sub-intervals of the opening during which the facility is closed.
    pub closed_breaks: Vec<TimeRange>,
    /// Open around the clock.
    pub is_full_day: bool,
}

impl DaySchedule {
    /// Creates a closed group for the given days.
    pub fn closed(weekdays: WeekdaySet) -> Self {
        Self {
            weekdays,
            ..Self::default()
        }
    }

    /// Creates a group open during `opening` on the given days.
    pub fn open(weekdays: WeekdaySet, opening: TimeRange) -> Self {
        Self {
            weekdays,
            opening: Some(opening),
            ..Self::default()
        }
    }

    /// Creates a group open around the clock on the given days.
    pub fn full_day(weekdays: WeekdaySet) -> Self {
        Self {
            weekdays,
            is_full_day: true,
            ..Self::default()
        }
    }

    /// Adds a closed break (unchecked; see `editor::add_closed_break`).
    pub fn with_break(mut self, range: TimeRange) -> Self {
        self.closed_breaks.push(range);
        self
    }

    /// Whether the group applies to `day`.
    #[inline]
    pub fn has_day(&self, day: Weekday) -> bool {
        self.weekdays.contains(day)
    }

    /// Whether the group's days are closed all day.
    pub fn is_closed(&self) -> bool {
        !self.is_full_day && self.opening.is_none()
    }

    /// Opening interval in the day's minute window, if timed.
    pub fn opening_span(&self) -> Option<MinuteSpan> {
        if self.is_full_day {
            return None;
        }
        self.opening.map(|o| o.span())
    }

    /// Whether `range` would sit strictly inside the opening.
    pub fn fits_break(&self, range: &TimeRange) -> bool {
        match self.opening_span() {
            Some(opening) => opening.strictly_contains(&range.span_after(opening.start)),
            None => false,
        }
    }

    /// Closed breaks mapped onto the opening's window, ordered by start.
    pub fn break_spans(&self) -> Vec<MinuteSpan> {
        let Some(opening) = self.opening_span() else {
            return Vec::new();
        };
        let mut spans: Vec<MinuteSpan> = self
            .closed_breaks
            .iter()
            .map(|b| b.span_after(opening.start))
            .collect();
        spans.sort_by_key(|s| s.start);
        spans
    }

    /// Open intervals of one such day: the opening minus its breaks.
    ///
    /// Spans are ordered and lie in the `0..2880` window. A full day is
    /// `[0, 1440)`; a closed group yields nothing.
    pub fn open_segments(&self) -> Vec<MinuteSpan> {
        if self.is_full_day {
            return vec![MinuteSpan::new(0, MINUTES_PER_DAY)];
        }
        let Some(opening) = self.opening_span() else {
            return Vec::new();
        };

        let mut segments = Vec::with_capacity(self.closed_breaks.len() + 1);
        let mut cursor = opening.start;
        for b in self.break_spans() {
            let start = b.start.clamp(opening.start, opening.end);
            let end = b.end.clamp(opening.start, opening.end);
            if start > cursor {
                segments.push(MinuteSpan::new(cursor, start));
            }
            cursor = cursor.max(end);
        }
        if cursor < opening.end {
            segments.push(MinuteSpan::new(cursor, opening.end));
        }
        segments
    }

    /// Whether two groups describe the same hours, ignoring their days.
    pub fn has_same_rule(&self, other: &Self) -> bool {
        self.open_segments() == other.open_segments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays() -> WeekdaySet {
        WeekdaySet::range(Weekday::Monday, Weekday::Friday)
    }

    #[test]
    fn test_rule_forms() {
        assert!(DaySchedule::closed(weekdays()).is_closed());
        assert!(!DaySchedule::full_day(weekdays()).is_closed());
        assert!(!DaySchedule::open(weekdays(), TimeRange::hm((9, 0), (18, 0))).is_closed());
    }

    #[test]
    fn test_open_segments_with_lunch_break() {
        let group = DaySchedule::open(weekdays(), TimeRange::hm((9, 0), (18, 0)))
            .with_break(TimeRange::hm((13, 0), (14, 0)));
        assert_eq!(
            group.open_segments(),
            vec![MinuteSpan::new(540, 780), MinuteSpan::new(840, 1080)]
        );
    }

    #[test]
    fn test_open_segments_overnight_break_after_midnight() {
        let group = DaySchedule::open(weekdays(), TimeRange::hm((20, 0), (4, 0)))
            .with_break(TimeRange::hm((1, 0), (2, 0)))
            .with_break(TimeRange::hm((22, 0), (23, 0)));
        assert_eq!(
            group.open_segments(),
            vec![
                MinuteSpan::new(1200, 1320),
                MinuteSpan::new(1380, 1500),
                MinuteSpan::new(1560, 1680),
            ]
        );
    }

    #[test]
    fn test_full_day_segments() {
        let group = DaySchedule::full_day(weekdays());
        assert_eq!(group.open_segments(), vec![MinuteSpan::new(0, 1440)]);
        assert!(DaySchedule::closed(weekdays()).open_segments().is_empty());
    }

    #[test]
    fn test_fits_break() {
        let group = DaySchedule::open(weekdays(), TimeRange::hm((22, 0), (6, 0)));
        assert!(group.fits_break(&TimeRange::hm((23, 30), (0, 30))));
        assert!(group.fits_break(&TimeRange::hm((2, 0), (3, 0))));
        assert!(!group.fits_break(&TimeRange::hm((22, 0), (23, 0)))); // touches start
        assert!(!group.fits_break(&TimeRange::hm((5, 0), (7, 0))));
        assert!(!DaySchedule::full_day(weekdays()).fits_break(&TimeRange::hm((1, 0), (2, 0))));
    }

    #[test]
    fn test_same_rule_ignores_days() {
        let a = DaySchedule::open(weekdays(), TimeRange::hm((9, 0), (18, 0)));
        let b = DaySchedule::open(WeekdaySet::of(&[Weekday::Sunday]), TimeRange::hm((9, 0), (18, 0)));
        assert!(a.has_same_rule(&b));
        assert!(!a.has_same_rule(&DaySchedule::full_day(weekdays())));
    }
}
