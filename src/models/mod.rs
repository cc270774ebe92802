//! Schedule domain models.
//!
//! Plain immutable values describing a facility's weekly operating hours.
//! Editing happens in [`crate::editor`], which returns new values instead
//! of mutating these.
//!
//! # Concepts
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`TimePoint`] | Clock time of day |
//! | [`TimeRange`] | One opening interval, possibly overnight |
//! | [`DaySchedule`] | Days sharing one rule (open / closed / full day) |
//! | [`WeekSchedule`] | Ordered day-groups, each weekday owned at most once |
//! | [`EvaluationResult`] | Open/closed state at an instant |

mod day_schedule;
mod info;
pub mod time;
mod week_schedule;
mod weekday;

pub use day_schedule::DaySchedule;
pub use info::{EvaluationResult, RuleState};
pub use time::{normalize_span, MinuteSpan, TimePoint, TimeRange, MINUTES_PER_DAY};
pub use week_schedule::WeekSchedule;
pub use weekday::{Weekday, WeekdaySet};
