//! Week schedule: the ordered list of day-groups.
//!
//! A weekday belongs to at most one group. Days covered by no group are
//! closed all day.

use serde::{Deserialize, Serialize};

use super::day_schedule::DaySchedule;
use super::weekday::{Weekday, WeekdaySet};

/// An ordered sequence of day-groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekSchedule {
    /// Day-groups in textual order.
    pub groups: Vec<DaySchedule>,
}

impl WeekSchedule {
    /// Creates an empty schedule (closed every day).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from its groups.
    pub fn from_groups(groups: Vec<DaySchedule>) -> Self {
        Self { groups }
    }

    /// Appends a group (unchecked; see `editor::append_group`).
    pub fn with_group(mut self, group: DaySchedule) -> Self {
        self.groups.push(group);
        self
    }

    /// Number of groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the schedule has no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group at `index`.
    pub fn get(&self, index: usize) -> Option<&DaySchedule> {
        self.groups.get(index)
    }

    /// Index of the group that owns `day`.
    pub fn group_index_for(&self, day: Weekday) -> Option<usize> {
        self.groups.iter().position(|g| g.has_day(day))
    }

    /// The group that owns `day`.
    pub fn group_for(&self, day: Weekday) -> Option<&DaySchedule> {
        self.groups.iter().find(|g| g.has_day(day))
    }

    /// Days owned by some group.
    pub fn claimed_days(&self) -> WeekdaySet {
        self.groups
            .iter()
            .fold(WeekdaySet::empty(), |acc, g| acc.union(&g.weekdays))
    }

    /// Days owned by no group.
    pub fn unclaimed_days(&self) -> WeekdaySet {
        self.claimed_days().complement()
    }

    /// Whether every day of the week is open around the clock.
    pub fn is_twenty_four_seven(&self) -> bool {
        Weekday::ALL
            .iter()
            .all(|day| self.group_for(*day).is_some_and(|g| g.is_full_day))
    }

    /// Semantic equality: every weekday has the same open hours.
    ///
    /// Group order, group boundaries and the explicit-minutes flag do not
    /// matter; an explicitly closed day equals an uncovered one.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        Weekday::ALL.iter().all(|day| {
            let ours = self.group_for(*day).map(|g| g.open_segments());
            let theirs = other.group_for(*day).map(|g| g.open_segments());
            ours.unwrap_or_default() == theirs.unwrap_or_default()
        })
    }
}
