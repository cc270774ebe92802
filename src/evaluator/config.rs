//! Evaluator settings.

use serde::{Deserialize, Serialize};

/// Look-ahead limits for finding the next open/closed transition.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Minimum regular (non-holiday) days after today to search. Holidays
    /// push the horizon further out, and so does a schedule whose next
    /// opening day lies beyond it.
    pub lookahead_days: u32,
    /// Hard limit on days scanned after today, holidays included.
    pub max_scan_days: u32,
}

impl EvaluatorConfig {
    /// Sets the number of regular days to look ahead.
    pub fn with_lookahead_days(mut self, days: u32) -> Self {
        self.lookahead_days = days;
        self
    }

    /// Sets the scan limit.
    pub fn with_max_scan_days(mut self, days: u32) -> Self {
        self.max_scan_days = days;
        self
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            lookahead_days: 7,
            max_scan_days: 366,
        }
    }
}
