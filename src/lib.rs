//! Facility opening hours: parse, edit, serialize and evaluate.
//!
//! Works on the practical subset of the OpenStreetMap `opening_hours`
//! language used for shops and offices: weekday selectors, clock ranges
//! (overnight and extended hours included), `off`/`open` modifiers and
//! `24/7`.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimePoint`, `TimeRange`, `DaySchedule`,
//!   `WeekSchedule`, `EvaluationResult`
//! - **`parser`**: Text into a `WeekSchedule` (typed errors, no partial results)
//! - **`serializer`**: `WeekSchedule` into canonical text
//! - **`editor`**: Pure edits that keep every schedule invariant
//! - **`evaluator`**: Open/closed state and minutes to the next transition,
//!   with holiday overrides
//! - **`validation`**: Grammar check for the full language and invariant
//!   checks for schedule values
//!
//! # Example
//!
//! ```
//! use u_opening_hours::{add_closed_break, parse, serialize, TimeRange};
//!
//! let schedule = parse("Mo-Fr 09:00-18:00").unwrap();
//! let schedule = add_closed_break(&schedule, 0, TimeRange::hm((13, 0), (14, 0))).unwrap();
//! assert_eq!(serialize(&schedule), "Mo-Fr 09:00-13:00,14:00-18:00");
//! ```
//!
//! # References
//!
//! - OpenStreetMap wiki, "Key:opening_hours/specification"

pub mod editor;
pub mod error;
pub mod evaluator;
mod grammar;
pub mod models;
pub mod parser;
pub mod serializer;
pub mod validation;

pub use editor::{
    add_closed_break, add_working_day, append_group, compute_complement, default_schedule,
    remove_closed_break, remove_group, remove_working_day, set_full_day, set_opening_time,
    DEFAULT_SCHEDULE,
};
pub use error::{EditError, ParseError};
pub use evaluator::{
    evaluate, evaluate_schedule, Evaluator, EvaluatorConfig, HolidayCalendar, NoHolidays,
};
pub use models::{
    DaySchedule, EvaluationResult, RuleState, TimePoint, TimeRange, WeekSchedule, Weekday,
    WeekdaySet,
};
pub use parser::parse;
pub use serializer::{serialize, serialize_checked};
pub use validation::{is_syntactically_valid, validate_schedule};
