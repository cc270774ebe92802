//! Time-of-day points, clock ranges and minute spans.
//!
//! # Time Model
//! All arithmetic is done in whole minutes since the midnight of the day
//! that owns a range. A range that ends before it starts is *overnight*:
//! it runs into the following day. Mapped onto minutes, every range of a
//! day lands inside the `0..2880` window (the owning day plus the next).
//!
//! [`normalize_span`] is the single place where that mapping happens.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Upper bound of the two-day minute window.
pub const WINDOW_MINUTES: u32 = 2 * MINUTES_PER_DAY;

/// Maps a clock range onto the owning day's minute window.
///
/// `start` is taken modulo one day. The returned end lies in
/// `(start, start + 1440]`: an `end` at or before `start` wraps into the
/// next day.
#[inline]
pub fn normalize_span(start: u32, end: u32) -> MinuteSpan {
    let start = start % MINUTES_PER_DAY;
    let end = end % MINUTES_PER_DAY;
    let end = if end <= start {
        end + MINUTES_PER_DAY
    } else {
        end
    };
    MinuteSpan::new(start, end)
}

/// A half-open minute interval `[start, end)`.
///
/// Offsets are minutes since the owning day's midnight, so values past
/// 1440 denote the next morning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MinuteSpan {
    /// Interval start (minutes, inclusive).
    pub start: u32,
    /// Interval end (minutes, exclusive).
    pub end: u32,
}

impl MinuteSpan {
    /// Creates a new span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the span in minutes.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether a minute offset falls within this span.
    #[inline]
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Whether `other` lies inside this span without touching either edge.
    pub fn strictly_contains(&self, other: &Self) -> bool {
        other.start > self.start && other.end < self.end
    }

    /// Whether two spans share at least one minute.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether two spans overlap or meet end to start.
    pub fn touches(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A time-of-day point.
///
/// `minutes_explicit` records whether the source text spelled out the
/// minutes (`09:00`) or only the hour (`9`). It is carried for fidelity
/// and does not take part in comparisons; use [`TimePoint::is_identical`]
/// to compare it as well.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimePoint {
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub minute: u8,
    /// Whether the minutes were written out.
    #[serde(default = "explicit_by_default")]
    pub minutes_explicit: bool,
}

fn explicit_by_default() -> bool {
    true
}

impl TimePoint {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        minutes_explicit: true,
    };

    /// Creates a time point with explicit minutes.
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            minutes_explicit: true,
        }
    }

    /// Creates a time point written as a bare hour (`9`).
    pub fn hour_only(hour: u8) -> Self {
        Self {
            hour,
            minute: 0,
            minutes_explicit: false,
        }
    }

    /// Creates a time point, rejecting out-of-range components.
    pub fn try_new(hour: u8, minute: u8) -> Option<Self> {
        let point = Self::new(hour, minute);
        point.is_valid().then_some(point)
    }

    /// Builds a time point from minutes since midnight (taken modulo one day).
    pub fn from_minute_of_day(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self::new((minutes / 60) as u8, (minutes % 60) as u8)
    }

    /// Sets the explicit-minutes flag.
    pub fn with_minutes_explicit(mut self, explicit: bool) -> Self {
        self.minutes_explicit = explicit;
        self
    }

    /// Whether hour and minute are within a civil day.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minute_of_day(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Compares clock value and the explicit-minutes flag.
    pub fn is_identical(&self, other: &Self) -> bool {
        self == other && self.minutes_explicit == other.minutes_explicit
    }
}

impl PartialEq for TimePoint {
    fn eq(&self, other: &Self) -> bool {
        self.minute_of_day() == other.minute_of_day()
    }
}

impl Eq for TimePoint {}

impl Hash for TimePoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.minute_of_day().hash(state);
    }
}

impl PartialOrd for TimePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minute_of_day().cmp(&other.minute_of_day())
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One continuous opening interval within a day.
///
/// `start != end`. When `end` is earlier than `start` the range is
/// overnight and continues on the following day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Range start (inclusive).
    pub start: TimePoint,
    /// Range end (exclusive).
    pub end: TimePoint,
}

impl TimeRange {
    /// Creates a new range.
    pub fn new(start: TimePoint, end: TimePoint) -> Self {
        Self { start, end }
    }

    /// Creates a range from `(hour, minute)` pairs.
    pub fn hm(start: (u8, u8), end: (u8, u8)) -> Self {
        Self::new(
            TimePoint::new(start.0, start.1),
            TimePoint::new(end.0, end.1),
        )
    }

    /// Whether start and end denote the same clock time.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Whether both points are valid and the range is not degenerate.
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid() && !self.is_degenerate()
    }

    /// Whether the range runs past midnight into the next day.
    #[inline]
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// Length of the range in minutes (1..=1439 for a valid range).
    pub fn duration_minutes(&self) -> u32 {
        self.span().duration()
    }

    /// The range mapped onto the owning day's minute window.
    pub fn span(&self) -> MinuteSpan {
        normalize_span(self.start.minute_of_day(), self.end.minute_of_day())
    }

    /// The range mapped onto the window of a day whose reference point
    /// is `origin` minutes after midnight.
    ///
    /// Starts earlier than `origin` are taken to lie on the next day,
    /// which is how a sub-range of an overnight range is located.
    pub fn span_after(&self, origin: u32) -> MinuteSpan {
        let span = self.span();
        if span.start < origin % MINUTES_PER_DAY {
            MinuteSpan::new(span.start + MINUTES_PER_DAY, span.end + MINUTES_PER_DAY)
        } else {
            span
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
