//! Evaluation result: open/closed state and time to the next transition.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// State of a facility at an instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RuleState {
    Open,
    Closed,
    /// The schedule text could not be evaluated. Not the same as closed.
    Unknown,
}

/// Result of evaluating a schedule at an instant.
///
/// Computed fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Current state.
    pub state: RuleState,
    /// Whole minutes until the state changes. `None` when no change was
    /// found within the look-ahead horizon (or the state is unknown).
    pub minutes_until_transition: Option<u32>,
    /// Local instant of the next change (minute precision).
    pub next_transition: Option<NaiveDateTime>,
}

impl EvaluationResult {
    /// A result for unevaluable input.
    pub fn unknown() -> Self {
        Self {
            state: RuleState::Unknown,
            minutes_until_transition: None,
            next_transition: None,
        }
    }

    /// Creates a known result. `now` must already be truncated to the minute.
    pub fn known(state: RuleState, minutes: Option<u32>, now: NaiveDateTime) -> Self {
        let next_transition = minutes.and_then(|m| {
            now.checked_add_signed(chrono::Duration::minutes(i64::from(m)))
        });
        Self {
            state,
            minutes_until_transition: minutes,
            next_transition,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == RuleState::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == RuleState::Closed
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.state == RuleState::Unknown
    }
}
