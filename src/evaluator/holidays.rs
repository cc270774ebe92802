//! Holiday sources.
//!
//! The evaluator only asks whether a given date is a holiday. Any
//! collection of dates works; [`NoHolidays`] stands for an empty one.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use chrono::NaiveDate;

/// A set of calendar dates on which the facility is closed all day.
pub trait HolidayCalendar {
    /// Whether `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A calendar without holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

impl<S: BuildHasher> HolidayCalendar for HashSet<NaiveDate, S> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

impl HolidayCalendar for BTreeSet<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

impl HolidayCalendar for [NaiveDate] {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

impl HolidayCalendar for Vec<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.as_slice().is_holiday(date)
    }
}
