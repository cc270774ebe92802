//! Open/closed evaluation at an instant.
//!
//! # Algorithm
//!
//! 1. Parse the text (or take a ready schedule) and check its invariants.
//! 2. Lay the open segments of every day from yesterday through the
//!    horizon onto one minute axis. Yesterday is included so that its
//!    overnight tail is seen.
//! 3. Block every holiday date from midnight to midnight, whatever the
//!    weekday rules say. A holiday also cuts off the previous day's
//!    overnight tail.
//! 4. Merge touching windows, so that `18:00-24:00` followed by a
//!    `00:00-03:00` next day reads as one open interval.
//! 5. Open: minutes to the end of the window containing now. Closed:
//!    minutes to the start of the next window.
//!
//! The horizon covers [`EvaluatorConfig::lookahead_days`] regular days
//! after today; holidays push it further. It also reaches the first
//! non-holiday date after today whose weekday has an opening, so a closed
//! state always finds the next opening when one exists. Both extensions
//! stop at [`EvaluatorConfig::max_scan_days`]. No transition inside the
//! horizon means `minutes_until_transition` is `None` (e.g. `24/7`, or no
//! opening at all).
//!
//! Seconds in `now` are ignored. Text that cannot be parsed evaluates to
//! [`RuleState::Unknown`], never to closed.

mod config;
mod holidays;
mod timeline;

pub use config::EvaluatorConfig;
pub use holidays::{HolidayCalendar, NoHolidays};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::models::{EvaluationResult, RuleState, WeekSchedule, Weekday, MINUTES_PER_DAY};
use crate::parser::parse;
use crate::validation::validate_schedule;
use timeline::Timeline;

const DAY: i64 = MINUTES_PER_DAY as i64;

/// Evaluates schedules with a given look-ahead configuration.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_opening_hours::{Evaluator, EvaluatorConfig, NoHolidays, RuleState};
///
/// let evaluator = Evaluator::new().with_config(EvaluatorConfig::default());
/// let monday_10am = NaiveDate::from_ymd_opt(2024, 6, 3)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
///
/// let info = evaluator.evaluate("Mo-Fr 09:00-18:00", &NoHolidays, monday_10am);
/// assert_eq!(info.state, RuleState::Open);
/// assert_eq!(info.minutes_until_transition, Some(480));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates an evaluator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates schedule text at `now`.
    pub fn evaluate<H>(&self, text: &str, holidays: &H, now: NaiveDateTime) -> EvaluationResult
    where
        H: HolidayCalendar + ?Sized,
    {
        match parse(text) {
            Ok(schedule) => self.evaluate_schedule(&schedule, holidays, now),
            Err(error) => {
                debug!(%error, text, "schedule text not evaluable");
                EvaluationResult::unknown()
            }
        }
    }

    /// Evaluates an already parsed schedule at `now`.
    pub fn evaluate_schedule<H>(
        &self,
        schedule: &WeekSchedule,
        holidays: &H,
        now: NaiveDateTime,
    ) -> EvaluationResult
    where
        H: HolidayCalendar + ?Sized,
    {
        if let Err(errors) = validate_schedule(schedule) {
            warn!(?errors, "schedule violates invariants; state unknown");
            return EvaluationResult::unknown();
        }

        let now = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        let today = now.date();
        let minute = i64::from(now.hour() * 60 + now.minute());

        let horizon = self.horizon_days(schedule, today, holidays);
        let horizon_end = (i64::from(horizon) + 1) * DAY;
        let open = build_timeline(schedule, holidays, today, horizon).resolve();

        let (state, until) = match open.iter().find(|w| w.contains(minute)) {
            Some(window) => (
                RuleState::Open,
                (window.end < horizon_end).then(|| window.end - minute),
            ),
            None => (
                RuleState::Closed,
                open.iter()
                    .find(|w| w.start > minute)
                    .map(|w| w.start - minute),
            ),
        };
        let until = until.and_then(|m| u32::try_from(m).ok());
        EvaluationResult::known(state, until, now)
    }

    /// Offset of the last day to scan: the `lookahead_days`-th regular
    /// day after today, or the first regular day with an opening if that
    /// comes later. Capped by `max_scan_days`.
    fn horizon_days<H>(&self, schedule: &WeekSchedule, today: NaiveDate, holidays: &H) -> u32
    where
        H: HolidayCalendar + ?Sized,
    {
        let has_opening = |day: Weekday| {
            schedule
                .group_for(day)
                .is_some_and(|group| !group.open_segments().is_empty())
        };
        let mut pending_opening = Weekday::ALL.into_iter().any(&has_opening);
        if self.config.lookahead_days == 0 && !pending_opening {
            return 0;
        }

        let mut regular = 0;
        for offset in 1..=self.config.max_scan_days {
            let Some(date) = shift(today, i64::from(offset)) else {
                return offset - 1;
            };
            if !holidays.is_holiday(date) {
                regular += 1;
                if has_opening(Weekday::from(date.weekday())) {
                    pending_opening = false;
                }
            }
            if regular >= self.config.lookahead_days && !pending_opening {
                return offset;
            }
        }
        if pending_opening {
            debug!(
                max_scan_days = self.config.max_scan_days,
                "no regular opening day within the scan limit"
            );
        }
        self.config.max_scan_days
    }
}

/// Evaluates schedule text at `now` with the default configuration.
///
/// Empty or unparsable text yields [`RuleState::Unknown`].
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use chrono::NaiveDate;
/// use u_opening_hours::{evaluate, RuleState};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let holidays: HashSet<NaiveDate> = [monday].into_iter().collect();
///
/// let info = evaluate("Mo-Fr 09:00-18:00", &holidays, monday.and_hms_opt(10, 0, 0).unwrap());
/// assert_eq!(info.state, RuleState::Closed);
/// assert_eq!(info.minutes_until_transition, Some(1380)); // Tuesday 09:00
/// ```
pub fn evaluate<H>(text: &str, holidays: &H, now: NaiveDateTime) -> EvaluationResult
where
    H: HolidayCalendar + ?Sized,
{
    Evaluator::new().evaluate(text, holidays, now)
}

/// Evaluates a schedule at `now` with the default configuration.
pub fn evaluate_schedule<H>(
    schedule: &WeekSchedule,
    holidays: &H,
    now: NaiveDateTime,
) -> EvaluationResult
where
    H: HolidayCalendar + ?Sized,
{
    Evaluator::new().evaluate_schedule(schedule, holidays, now)
}

fn build_timeline<H>(schedule: &WeekSchedule, holidays: &H, today: NaiveDate, horizon: u32) -> Timeline
where
    H: HolidayCalendar + ?Sized,
{
    let mut timeline = Timeline::new();
    let last = i64::from(horizon);
    for offset in -1..=last + 1 {
        let Some(date) = shift(today, offset) else {
            continue;
        };
        let base = offset * DAY;
        if holidays.is_holiday(date) {
            timeline.add_blocked(base, base + DAY);
            continue;
        }
        // The day after the horizon only matters as a blocker for the
        // last day's overnight tail.
        if offset > last {
            continue;
        }
        if let Some(group) = schedule.group_for(Weekday::from(date.weekday())) {
            for segment in group.open_segments() {
                timeline.add_window(base + i64::from(segment.start), base + i64::from(segment.end));
            }
        }
    }
    timeline
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySchedule, TimeRange, WeekdaySet};
    use std::collections::{BTreeSet, HashSet};

    const OFFICE: &str = "Mo-Fr 09:00-18:00";

    /// 2024-06-03 is a Monday.
    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        june(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    fn check(text: &str, now: NaiveDateTime, state: RuleState, minutes: Option<u32>) {
        let info = evaluate(text, &NoHolidays, now);
        assert_eq!(info.state, state, "{text} at {now}");
        assert_eq!(info.minutes_until_transition, minutes, "{text} at {now}");
    }

    #[test]
    fn test_open_during_hours() {
        check(OFFICE, at(3, 10, 0), RuleState::Open, Some(480));
        check(OFFICE, at(3, 9, 0), RuleState::Open, Some(540));
    }

    #[test]
    fn test_closed_in_the_evening() {
        check(OFFICE, at(3, 19, 0), RuleState::Closed, Some(840));
        check(OFFICE, at(3, 18, 0), RuleState::Closed, Some(900));
    }

    #[test]
    fn test_closed_over_the_weekend() {
        check(OFFICE, at(7, 19, 0), RuleState::Closed, Some(3720));
        check(OFFICE, at(9, 12, 0), RuleState::Closed, Some(1260));
    }

    #[test]
    fn test_overnight_tail_from_yesterday() {
        check("Mo-Fr 22:00-02:00", at(4, 1, 0), RuleState::Open, Some(60));
        check("Mo-Fr 22:00-02:00", at(3, 23, 0), RuleState::Open, Some(180));
        // Saturday 01:00 still belongs to Friday night.
        check("Mo-Fr 22:00-02:00", at(8, 1, 0), RuleState::Open, Some(60));
    }

    #[test]
    fn test_windows_merge_across_midnight() {
        check("Mo 20:00-24:00; Tu 00:00-03:00", at(3, 23, 0), RuleState::Open, Some(240));
    }

    #[test]
    fn test_closed_break() {
        let text = "Mo-Fr 09:00-13:00,14:00-18:00";
        check(text, at(3, 12, 0), RuleState::Open, Some(60));
        check(text, at(3, 13, 30), RuleState::Closed, Some(30));
        check(text, at(3, 14, 0), RuleState::Open, Some(240));
    }

    #[test]
    fn test_twenty_four_seven_has_no_transition() {
        check("24/7", at(5, 12, 0), RuleState::Open, None);
    }

    #[test]
    fn test_never_open() {
        check("off", at(5, 12, 0), RuleState::Closed, None);
        check("Mo-Su off", at(5, 12, 0), RuleState::Closed, None);
    }

    #[test]
    fn test_unknown_on_unparsable_text() {
        for text in ["", "   ", "Mo-Fr sunrise-sunset", "PH off", "garbage"] {
            let info = evaluate(text, &NoHolidays, at(3, 10, 0));
            assert!(info.is_unknown(), "{text}");
            assert_eq!(info.minutes_until_transition, None);
            assert_eq!(info.next_transition, None);
        }
    }

    #[test]
    fn test_unknown_on_invalid_schedule() {
        let broken = WeekSchedule::new()
            .with_group(DaySchedule::open(WeekdaySet::all(), TimeRange::hm((9, 0), (18, 0))))
            .with_group(DaySchedule::closed(WeekdaySet::of(&[Weekday::Monday])));
        assert!(evaluate_schedule(&broken, &NoHolidays, at(3, 10, 0)).is_unknown());
    }

    #[test]
    fn test_holiday_closes_whole_day() {
        let holidays: HashSet<NaiveDate> = [june(3)].into_iter().collect();
        let info = evaluate(OFFICE, &holidays, at(3, 10, 0));
        assert!(info.is_closed());
        assert_eq!(info.minutes_until_transition, Some(1380));
        assert_eq!(info.next_transition, Some(at(4, 9, 0)));
    }

    #[test]
    fn test_holiday_cuts_overnight_tail() {
        let holidays = vec![june(4)];
        let text = "Mo-Fr 22:00-02:00";
        let info = evaluate(text, &holidays, at(4, 1, 0));
        assert!(info.is_closed());
        assert_eq!(info.minutes_until_transition, Some(2700)); // Wednesday 22:00

        let info = evaluate(text, &holidays, at(3, 23, 0));
        assert!(info.is_open());
        assert_eq!(info.minutes_until_transition, Some(60));
    }

    #[test]
    fn test_holiday_ends_twenty_four_seven() {
        let holidays: BTreeSet<NaiveDate> = [june(6)].into_iter().collect();
        let info = evaluate("24/7", &holidays, at(5, 10, 0));
        assert!(info.is_open());
        assert_eq!(info.minutes_until_transition, Some(840));

        let info = evaluate("24/7", &holidays, at(6, 10, 0));
        assert!(info.is_closed());
        assert_eq!(info.minutes_until_transition, Some(840));
    }

    #[test]
    fn test_seconds_are_truncated() {
        let now = june(3).and_hms_opt(10, 0, 59).unwrap();
        let info = evaluate(OFFICE, &NoHolidays, now);
        assert_eq!(info.minutes_until_transition, Some(480));
        assert_eq!(info.next_transition, Some(at(3, 18, 0)));
    }

    #[test]
    fn test_short_lookahead() {
        let evaluator = Evaluator::new().with_config(EvaluatorConfig::default().with_lookahead_days(1));
        // Friday evening: the weekend has no opening, so the scan runs on
        // to Monday.
        let info = evaluator.evaluate(OFFICE, &NoHolidays, at(7, 19, 0));
        assert!(info.is_closed());
        assert_eq!(info.minutes_until_transition, Some(3720));

        // An opening that runs past the horizon has no reported end.
        let weekend = "Mo-Fr 09:00-18:00; Sa-Su 00:00-24:00";
        let info = evaluator.evaluate(weekend, &NoHolidays, at(8, 10, 0));
        assert!(info.is_open());
        assert_eq!(info.minutes_until_transition, None);

        // A holiday pushes the horizon one day further.
        let info = evaluator.evaluate(OFFICE, &[june(4)][..], at(3, 19, 0));
        assert_eq!(info.minutes_until_transition, Some(2280));
    }

    #[test]
    fn test_scan_limit() {
        let evaluator = Evaluator::new().with_config(
            EvaluatorConfig::default()
                .with_lookahead_days(7)
                .with_max_scan_days(2),
        );
        let info = evaluator.evaluate("Sa 10:00-12:00", &NoHolidays, at(3, 10, 0));
        assert!(info.is_closed());
        assert_eq!(info.minutes_until_transition, None);
        assert_eq!(evaluator.config().max_scan_days, 2);
    }

    #[test]
    fn test_holiday_on_next_opening_day() {
        // The only Monday in the default lookahead is a holiday.
        let info = evaluate("Mo 09:00-10:00", &vec![june(10)], at(3, 11, 0));
        assert!(info.is_closed());
        assert_eq!(info.minutes_until_transition, Some(20040));
        assert_eq!(info.next_transition, Some(at(17, 9, 0)));
    }

    #[test]
    fn test_holidays_beyond_default_lookahead() {
        let holidays: BTreeSet<NaiveDate> = (4..=20).map(june).collect();
        let info = evaluate(OFFICE, &holidays, at(3, 19, 0));
        assert!(info.is_closed());
        assert_eq!(info.next_transition, Some(at(21, 9, 0)));
    }

    #[test]
    fn test_evaluate_schedule_matches_text() {
        let schedule = parse(OFFICE).unwrap();
        assert_eq!(
            evaluate_schedule(&schedule, &NoHolidays, at(3, 10, 0)),
            evaluate(OFFICE, &NoHolidays, at(3, 10, 0))
        );
    }
}
