//! Validation for schedule text and schedule values.
//!
//! Two independent checks:
//! - [`is_syntactically_valid`]: grammar-level check of text against the
//!   wider `opening_hours` language. Does not build a schedule.
//! - [`validate_schedule`]: invariant check of a [`WeekSchedule`](crate::models::WeekSchedule)
//!   value (no double-assigned weekday, breaks inside the opening, ...).

mod invariants;
mod syntax;

pub use invariants::validate_schedule;
pub use syntax::is_syntactically_valid;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A weekday is owned by two groups.
    DuplicateWeekday,
    /// A group covers no weekday.
    EmptyGroup,
    /// A time point is out of range or a range has no length.
    InvalidRange,
    /// A closed break is not strictly inside the opening.
    BreakOutsideOpening,
    /// Two closed breaks overlap or touch.
    OverlappingBreaks,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
