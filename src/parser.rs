//! Structural parser: schedule text into a [`WeekSchedule`].
//!
//! # Supported Subset
//!
//! ```text
//! schedule := rule ( ';' rule )*
//! rule     := '24/7' | days | times | days ' ' ( times | 'off' | 'closed' | 'open' )
//! days     := day ( '-' day )? ( ',' day ( '-' day )? )*      day ∈ Mo Tu We Th Fr Sa Su
//! times    := range ( ',' range )*
//! range    := clock '-' clock                                  clock := H[H][:MM]
//! ```
//!
//! A rule without days applies to the whole week; a rule without times
//! is open all day. End times may be `24:00` or use extended hours
//! (`25:30` = 01:30 the next morning).
//!
//! Several ranges in one rule become one opening plus closed breaks for
//! the gaps between them. When two rules name the same weekday the later
//! rule wins for that day.
//!
//! Anything else (years, months, weeks, holidays, comments, sun events,
//! fallback rules) is rejected with a [`ParseError`]; the parser never
//! returns a schedule with a clause dropped.
//!
//! # Algorithm
//!
//! Text is matched against the weekly-subset entry rule of the grammar and
//! each rule is built from its pairs. When the subset does not match, the
//! text is matched against the full language to tell an unsupported
//! construct from malformed text.

use pest::error::{Error as PestError, InputLocation};
use pest::iterators::Pair;
use pest::Parser;
use tracing::trace;

use crate::error::ParseError;
use crate::grammar::{OHParser, Rule};
use crate::models::time::WINDOW_MINUTES;
use crate::models::{
    DaySchedule, TimePoint, TimeRange, WeekSchedule, Weekday, WeekdaySet, MINUTES_PER_DAY,
};

/// Literal for "every day, all day".
pub const TWENTY_FOUR_SEVEN: &str = "24/7";

/// Parses schedule text into a week schedule.
///
/// # Examples
///
/// ```
/// use u_opening_hours::{parse, Weekday};
///
/// let schedule = parse("Mo-Fr 09:00-18:00; Sa 10:00-14:00").unwrap();
/// assert_eq!(schedule.len(), 2);
/// assert!(schedule.group_for(Weekday::Wednesday).is_some());
/// assert!(schedule.group_for(Weekday::Sunday).is_none());
/// ```
pub fn parse(text: &str) -> Result<WeekSchedule, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let pair = OHParser::parse(Rule::input_week_schedule, text)
        .map_err(|err| reject(text, &err))?
        .next()
        .ok_or_else(|| unexpected_at(text, 0))?;
    build_week_schedule(pair)
}

fn build_week_schedule(pair: Pair<Rule>) -> Result<WeekSchedule, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::week_schedule);
    let text = pair.as_str();
    let mut schedule = WeekSchedule::new();

    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::week_rule => {
                let rule = pair.as_str();
                let group = build_week_rule(pair)?;
                trace!(rule, days = group.weekdays.len(), "parsed rule");
                apply_rule(&mut schedule, group);
            }
            Rule::normal_rule_separator => {}
            _ => return Err(unexpected_token(&pair, text)),
        }
    }
    Ok(schedule)
}

/// Appends a rule, taking its weekdays away from every earlier group.
fn apply_rule(schedule: &mut WeekSchedule, group: DaySchedule) {
    for (index, earlier) in schedule.groups.iter_mut().enumerate() {
        let shadowed = earlier.weekdays.intersection(&group.weekdays);
        if !shadowed.is_empty() {
            trace!(group = index, days = shadowed.len(), "later rule overrides weekdays");
            earlier.weekdays = earlier.weekdays.difference(&group.weekdays);
        }
    }
    schedule.groups.retain(|g| !g.weekdays.is_empty());
    schedule.groups.push(group);
}

fn build_week_rule(pair: Pair<Rule>) -> Result<DaySchedule, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::week_rule);
    let rule = pair.as_str();
    let mut days = WeekdaySet::all();
    let mut group = None;

    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::always_open => return Ok(DaySchedule::full_day(WeekdaySet::all())),
            Rule::day_selector => days = build_day_selector(pair)?,
            Rule::rules_modifier => group = Some(build_rules_modifier(pair, days, rule)?),
            Rule::clock_selector => group = Some(build_clock_selector(pair, days)?),
            _ => return Err(unexpected_token(&pair, rule)),
        }
    }
    Ok(group.unwrap_or_else(|| DaySchedule::full_day(days)))
}

fn build_rules_modifier(
    pair: Pair<Rule>,
    days: WeekdaySet,
    rule: &str,
) -> Result<DaySchedule, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::rules_modifier);
    let modifier = pair
        .into_inner()
        .next()
        .ok_or_else(|| unexpected_at(rule, 0))?;

    match modifier.as_rule() {
        Rule::rules_modifier_open => Ok(DaySchedule::full_day(days)),
        Rule::rules_modifier_closed => Ok(DaySchedule::closed(days)),
        Rule::rules_modifier_unknown => Err(unsupported("unknown modifier", rule)),
        _ => Err(unexpected_token(&modifier, rule)),
    }
}

fn build_day_selector(pair: Pair<Rule>) -> Result<WeekdaySet, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::day_selector);
    let text = pair.as_str();
    let mut days = WeekdaySet::empty();

    for span in pair.into_inner() {
        let names = span
            .into_inner()
            .map(|name| parse_day(name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let set = match names.as_slice() {
            [day] => WeekdaySet::of(&[*day]),
            [first, last] => WeekdaySet::range(*first, *last),
            _ => return Err(ParseError::InvalidDay(text.into())),
        };
        days = days.union(&set);
    }
    Ok(days)
}

fn parse_day(token: &str) -> Result<Weekday, ParseError> {
    Weekday::from_token(token).ok_or_else(|| ParseError::InvalidDay(token.into()))
}

/// A clock reading in minutes, possibly past midnight (extended hours).
#[derive(Debug, Clone, Copy)]
struct Clock {
    minutes: u32,
    explicit: bool,
}

/// One textual range mapped onto the owning day's `0..2880` window.
#[derive(Debug, Clone, Copy)]
struct RawRange {
    start: Clock,
    end: Clock,
}

fn build_clock_selector(pair: Pair<Rule>, days: WeekdaySet) -> Result<DaySchedule, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::clock_selector);
    let token = pair.as_str();
    let mut ranges = pair
        .into_inner()
        .map(build_clock_span)
        .collect::<Result<Vec<_>, _>>()?;
    ranges.sort_by_key(|r| r.start.minutes);

    let mut merged: Vec<RawRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(prev) if range.start.minutes < prev.end.minutes => {
                return Err(ParseError::OverlappingRanges(token.into()));
            }
            Some(prev) if range.start.minutes == prev.end.minutes => prev.end = range.end,
            _ => merged.push(range),
        }
    }

    let (Some(first), Some(last)) = (merged.first().copied(), merged.last().copied()) else {
        return Err(ParseError::InvalidTime(token.into()));
    };
    if first.start.minutes >= MINUTES_PER_DAY {
        return Err(ParseError::InvalidTime(format!(
            "{token}: earliest range starts after midnight"
        )));
    }

    let total = last.end.minutes - first.start.minutes;
    if total > MINUTES_PER_DAY || (total == MINUTES_PER_DAY && merged.len() > 1) {
        return Err(ParseError::SpanTooLong(token.into()));
    }
    if total == MINUTES_PER_DAY {
        return Ok(DaySchedule::full_day(days));
    }

    let opening = TimeRange::new(point(first.start), point(last.end));
    let closed_breaks = merged
        .windows(2)
        .map(|pair| TimeRange::new(point(pair[0].end), point(pair[1].start)))
        .collect();
    Ok(DaySchedule {
        weekdays: days,
        opening: Some(opening),
        closed_breaks,
        is_full_day: false,
    })
}

fn point(clock: Clock) -> TimePoint {
    TimePoint::from_minute_of_day(clock.minutes).with_minutes_explicit(clock.explicit)
}

fn build_clock_span(pair: Pair<Rule>) -> Result<RawRange, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::clock_span);
    let part = pair.as_str();
    let clocks = pair
        .into_inner()
        .map(|clock| parse_clock(clock.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let &[start, mut end] = clocks.as_slice() else {
        return Err(ParseError::InvalidTime(part.into()));
    };

    if start.minutes == end.minutes {
        return Err(ParseError::EmptyRange(part.into()));
    }
    if end.minutes < start.minutes {
        end.minutes += MINUTES_PER_DAY;
    }
    if end.minutes - start.minutes > MINUTES_PER_DAY || end.minutes > WINDOW_MINUTES {
        return Err(ParseError::SpanTooLong(part.into()));
    }
    Ok(RawRange { start, end })
}

/// `H`, `HH`, `H:MM` or `HH:MM`, up to `48:00`.
fn parse_clock(text: &str) -> Result<Clock, ParseError> {
    let invalid = || ParseError::InvalidTime(text.into());
    let (hours, minutes) = match text.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (text, None),
    };

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = match minutes {
        Some(m) if m.len() == 2 => m.parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
        None => 0,
    };

    let total = hour * 60 + minute;
    if minute > 59 || total > WINDOW_MINUTES {
        return Err(invalid());
    }
    Ok(Clock {
        minutes: total,
        explicit: minutes.is_some(),
    })
}

/// Maps a subset mismatch onto a typed error, using the full grammar to
/// name the construct that fell outside the subset.
fn reject(text: &str, subset_error: &PestError<Rule>) -> ParseError {
    let fallback = || unexpected_at(text, error_position(subset_error));
    let Ok(mut pairs) = OHParser::parse(Rule::input_opening_hours, text) else {
        return fallback();
    };
    let Some(opening_hours) = pairs.next() else {
        return fallback();
    };

    for pair in opening_hours.into_inner() {
        let found = match pair.as_rule() {
            Rule::rule_sequence => outside_subset(pair),
            Rule::any_rule_separator => separator_outside_subset(pair, text),
            _ => None,
        };
        if let Some(err) = found {
            trace!(error = %err, "rule outside the weekly subset");
            return err;
        }
    }
    fallback()
}

fn outside_subset(rule_sequence: Pair<Rule>) -> Option<ParseError> {
    let rule = rule_sequence.as_str();
    rule_sequence
        .into_inner()
        .flatten()
        .find_map(|pair| unsupported_construct(pair.as_rule()))
        .map(|construct| unsupported(construct, rule))
}

fn separator_outside_subset(separator: Pair<Rule>, text: &str) -> Option<ParseError> {
    let inner = separator.into_inner().next()?;
    match inner.as_rule() {
        Rule::fallback_rule_separator => Some(unsupported("fallback rule", text)),
        Rule::additional_rule_separator => Some(ParseError::UnexpectedToken {
            token: inner.as_str().into(),
            rule: text.trim().into(),
        }),
        _ => None,
    }
}

fn unsupported_construct(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::year_selector => Some("year selector"),
        Rule::monthday_selector => Some("month or date selector"),
        Rule::week_selector => Some("week selector"),
        Rule::holiday => Some("holiday selector"),
        Rule::nth_sequence => Some("nth weekday of month"),
        Rule::day_offset => Some("day offset"),
        Rule::variable_time => Some("sun event"),
        Rule::timespan_plus => Some("open-ended time"),
        Rule::period => Some("periodic selector"),
        Rule::rules_modifier_unknown => Some("unknown modifier"),
        Rule::comment => Some("comment"),
        _ => None,
    }
}

fn unsupported(construct: &'static str, rule: &str) -> ParseError {
    ParseError::Unsupported {
        construct,
        rule: rule.trim().into(),
    }
}

fn unexpected_token(pair: &Pair<Rule>, rule: &str) -> ParseError {
    ParseError::UnexpectedToken {
        token: pair.as_str().into(),
        rule: rule.into(),
    }
}

fn unexpected_at(text: &str, position: usize) -> ParseError {
    let token = text
        .get(position..)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("end of input");
    ParseError::UnexpectedToken {
        token: token.into(),
        rule: text.trim().into(),
    }
}

fn error_position(err: &PestError<Rule>) -> usize {
    match err.location {
        InputLocation::Pos(position) => position,
        InputLocation::Span((start, _)) => start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays() -> WeekdaySet {
        WeekdaySet::range(Weekday::Monday, Weekday::Friday)
    }

    #[test]
    fn test_single_rule() {
        let s = parse("Mo-Fr 09:00-18:00").unwrap();
        assert_eq!(s.len(), 1);
        let g = &s.groups[0];
        assert_eq!(g.weekdays, weekdays());
        assert_eq!(g.opening, Some(TimeRange::hm((9, 0), (18, 0))));
        assert!(g.closed_breaks.is_empty());
        assert!(!g.is_full_day);
    }

    #[test]
    fn test_two_rules() {
        let s = parse("Mo-Fr 09:00-18:00; Sa 12:00-14:00").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.groups[1].weekdays, WeekdaySet::of(&[Weekday::Saturday]));
        assert_eq!(s.groups[1].opening, Some(TimeRange::hm((12, 0), (14, 0))));
    }

    #[test]
    fn test_twenty_four_seven() {
        let s = parse("24/7").unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.groups[0].is_full_day);
        assert!(s.groups[0].weekdays.is_full());
    }

    #[test]
    fn test_hour_only_times() {
        let s = parse("Mo 9-18").unwrap();
        let opening = s.groups[0].opening.unwrap();
        assert_eq!(opening, TimeRange::hm((9, 0), (18, 0)));
        assert!(!opening.start.minutes_explicit);
        assert!(!opening.end.minutes_explicit);
    }

    #[test]
    fn test_day_lists_and_spacing() {
        let s = parse("Mo, We - Fr 10:00 - 12:00").unwrap();
        assert_eq!(
            s.groups[0].weekdays,
            WeekdaySet::of(&[
                Weekday::Monday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday
            ])
        );
    }

    #[test]
    fn test_wrapping_day_range() {
        let s = parse("Fr-Mo 18:00-23:00").unwrap();
        assert_eq!(
            s.groups[0].weekdays,
            WeekdaySet::range(Weekday::Friday, Weekday::Monday)
        );
    }

    #[test]
    fn test_split_ranges_become_break() {
        let s = parse("Mo-Fr 09:00-13:00,14:00-18:00").unwrap();
        let g = &s.groups[0];
        assert_eq!(g.opening, Some(TimeRange::hm((9, 0), (18, 0))));
        assert_eq!(g.closed_breaks, vec![TimeRange::hm((13, 0), (14, 0))]);
    }

    #[test]
    fn test_touching_ranges_merge() {
        let s = parse("Mo 09:00-13:00,13:00-18:00").unwrap();
        assert_eq!(s.groups[0].opening, Some(TimeRange::hm((9, 0), (18, 0))));
        assert!(s.groups[0].closed_breaks.is_empty());
    }

    #[test]
    fn test_overnight_and_extended_hours() {
        let s = parse("Fr 22:00-02:00").unwrap();
        assert!(s.groups[0].opening.unwrap().is_overnight());

        let s = parse("Sa 20:00-23:00,25:00-28:00").unwrap();
        let g = &s.groups[0];
        assert_eq!(g.opening, Some(TimeRange::hm((20, 0), (4, 0))));
        assert_eq!(g.closed_breaks, vec![TimeRange::hm((23, 0), (1, 0))]);
    }

    #[test]
    fn test_midnight_end() {
        let s = parse("Mo 18:00-24:00").unwrap();
        assert_eq!(s.groups[0].opening, Some(TimeRange::hm((18, 0), (0, 0))));

        let s = parse("Mo 00:00-24:00").unwrap();
        assert!(s.groups[0].is_full_day);
    }

    #[test]
    fn test_modifiers() {
        let s = parse("Mo-Fr 09:00-18:00; We off").unwrap();
        assert_eq!(s.len(), 2);
        assert!(!s.groups[0].has_day(Weekday::Wednesday));
        assert!(s.groups[1].is_closed());

        let s = parse("Sa,Su open").unwrap();
        assert!(s.groups[0].is_full_day);

        let s = parse("Su closed").unwrap();
        assert!(s.groups[0].is_closed());
    }

    #[test]
    fn test_rule_without_days_covers_week() {
        let s = parse("10:00-20:00").unwrap();
        assert!(s.groups[0].weekdays.is_full());

        let s = parse("Mo-Fr").unwrap();
        assert!(s.groups[0].is_full_day);
    }

    #[test]
    fn test_last_rule_wins() {
        let s = parse("Mo-Su 08:00-20:00; Sa,Su 10:00-16:00").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(
            s.groups[0].weekdays,
            WeekdaySet::range(Weekday::Monday, Weekday::Friday)
        );
        let sat = s.group_for(Weekday::Saturday).unwrap();
        assert_eq!(sat.opening, Some(TimeRange::hm((10, 0), (16, 0))));
    }

    #[test]
    fn test_fully_shadowed_rule_is_dropped() {
        let s = parse("Sa 10:00-12:00; Sa-Su 11:00-13:00").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.groups[0].opening, Some(TimeRange::hm((11, 0), (13, 0))));
    }

    #[test]
    fn test_rejects_unsupported_constructs() {
        for text in [
            "2024 Mo-Fr 09:00-18:00",
            "Jan-Mar Mo 10:00-12:00",
            "week 01-10 Mo 10:00-12:00",
            "PH off",
            "Mo-Fr 09:00-18:00; PH off",
            "Mo-Fr sunrise-sunset",
            "Mo[1] 10:00-12:00",
            "Mo-Fr 09:00-18:00 \"by appointment\"",
            "Mo-Fr 09:00-18:00 || \"call us\"",
            "Mo-Fr 17:00+",
            "Mo-Fr 09:00-18:00 unknown",
        ] {
            assert!(
                matches!(parse(text), Err(ParseError::Unsupported { .. })),
                "expected unsupported: {text}"
            );
        }
    }

    #[test]
    fn test_names_unsupported_construct() {
        let construct = |text: &str| match parse(text) {
            Err(ParseError::Unsupported { construct, .. }) => construct,
            other => panic!("expected unsupported for {text}: {other:?}"),
        };
        assert_eq!(construct("2024 Mo-Fr 09:00-18:00"), "year selector");
        assert_eq!(construct("Dec 24 off"), "month or date selector");
        assert_eq!(construct("Mo-Fr 09:00-18:00; PH off"), "holiday selector");
        assert_eq!(construct("Mo[1,-1] 10:00-12:00"), "nth weekday of month");
        assert_eq!(construct("Mo-Fr (sunrise+01:00)-18:00"), "sun event");
        assert_eq!(construct("Mo-Fr 17:00+"), "open-ended time");
        assert_eq!(construct("Mo-Fr 10:00-16:00/01:30"), "periodic selector");
        assert_eq!(construct("Mo off \"by appointment\""), "comment");
        assert_eq!(construct("Mo off || Tu off"), "fallback rule");

        match parse("Mo-Fr 09:00-18:00 \"by appointment\"") {
            Err(ParseError::Unsupported { rule, .. }) => {
                assert_eq!(rule, "Mo-Fr 09:00-18:00 \"by appointment\"")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_additional_rule_separator_is_rejected() {
        assert_eq!(
            parse("Mo-Fr 09:00-18:00, Sa 10:00-12:00"),
            Err(ParseError::UnexpectedToken {
                token: ",".into(),
                rule: "Mo-Fr 09:00-18:00, Sa 10:00-12:00".into(),
            })
        );
    }

    #[test]
    fn test_rejects_malformed_text() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert!(matches!(parse("Mx 10:00-12:00"), Err(ParseError::InvalidDay(_))));
        assert!(matches!(parse("Mo 10:61-12:00"), Err(ParseError::InvalidTime(_))));
        assert!(matches!(parse("Mo 10:00-12:5"), Err(ParseError::InvalidTime(_))));
        assert!(matches!(parse("Mo 10:00"), Err(ParseError::InvalidTime(_))));
        assert!(matches!(parse("Mo 10:00-10:00"), Err(ParseError::EmptyRange(_))));
        assert!(matches!(
            parse("Mo 10:00-12:00,11:00-13:00"),
            Err(ParseError::OverlappingRanges(_))
        ));
        assert!(matches!(
            parse("Mo 00:00-12:00,13:00-24:00"),
            Err(ParseError::SpanTooLong(_))
        ));
        assert!(matches!(
            parse("Mo-Fr 09:00-18:00;"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse("Mo-Fr 09:00-18:00, Sa 10:00-12:00"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }
}
