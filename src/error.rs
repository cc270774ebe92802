//! Error types for parsing and editing.
//!
//! The two channels are kept apart: [`ParseError`] reports text outside the
//! supported grammar, [`EditError`] reports an edit request that breaks a
//! documented precondition. An unevaluable schedule is not an error; the
//! evaluator reports it as `RuleState::Unknown`.

use crate::models::{TimeRange, Weekday};
use crate::validation::ValidationError;

/// Schedule text does not conform to the supported grammar subset.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty schedule text")]
    Empty,

    #[error("unexpected token '{token}' in rule '{rule}'")]
    UnexpectedToken { token: String, rule: String },

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("invalid day selector: {0}")]
    InvalidDay(String),

    #[error("time range has no length: {0}")]
    EmptyRange(String),

    #[error("overlapping time ranges: {0}")]
    OverlappingRanges(String),

    #[error("time ranges span more than one day: {0}")]
    SpanTooLong(String),

    #[error("unsupported construct ({construct}) in rule '{rule}'")]
    Unsupported {
        construct: &'static str,
        rule: String,
    },
}

/// An edit request violates a schedule invariant or references a missing item.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("group index {index} out of range (schedule has {len} groups)")]
    GroupOutOfRange { index: usize, len: usize },

    #[error("break index {index} out of range (group has {len} breaks)")]
    BreakOutOfRange { index: usize, len: usize },

    #[error("{day} already belongs to group {owner}")]
    DayAlreadyAssigned { day: Weekday, owner: usize },

    #[error("{day} is not part of group {group}")]
    DayNotInGroup { day: Weekday, group: usize },

    #[error("invalid or zero-length time range {0}")]
    InvalidRange(TimeRange),

    #[error("group {0} has no opening time")]
    NoOpeningTime(usize),

    #[error("group {0} is open all day")]
    FullDay(usize),

    #[error("break {range} is not strictly inside the opening of group {group}")]
    BreakOutsideOpening { range: TimeRange, group: usize },

    #[error("break {range} overlaps an existing break of group {group}")]
    BreakOverlap { range: TimeRange, group: usize },

    #[error("a group must cover at least one day")]
    EmptyGroup,

    /// The schedule handed to the edit already breaks an invariant.
    #[error("schedule violates {} invariant(s)", .0.len())]
    InvalidSchedule(Vec<ValidationError>),
}
