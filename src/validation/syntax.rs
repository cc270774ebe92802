//! Syntactic check for the wider `opening_hours` grammar.
//!
//! Matches the full-language entry rule of the crate grammar and builds
//! nothing. It accepts constructs the structural parser rejects (years,
//! months, weeks, `PH`/`SH`, nth weekdays, sun events, open-ended times,
//! comments, fallback rules), so a string can be syntactically valid yet
//! not editable.
//!
//! # Grammar (simplified)
//!
//! ```text
//! schedule  := rule ( ( ';' | ',' | '||' ) rule )*
//! rule      := ( '24/7' | [years] [months] [weeks] [':'] [weekdays] [times] ) [modifier] [comment]
//! years     := YYYY [ '-' YYYY ] [ '/' n ] ( ',' ... )*
//! months    := Mon [dd] [ '-' ( Mon [dd] | dd ) ] ( ',' ... )*
//! weeks     := 'week' nn [ '-' nn ] [ '/' n ] ( ',' ... )*
//! weekdays  := ( Wd [ '-' Wd ] [ '[' nth ']' ] | 'PH' | 'SH' ) [ offset ] ( ',' ... )*
//! times     := span ( ',' span )*
//! span      := time ( '+' | '-' time [ '+' ] [ '/' period ] )?
//! time      := h[h][:mm] | event | '(' event ( '+' | '-' ) hh:mm ')'
//! modifier  := 'open' | 'closed' | 'off' | 'unknown'
//! ```

use pest::Parser;

use crate::grammar::{OHParser, Rule};

/// Whether `text` is a lexically and syntactically well-formed schedule.
///
/// # Examples
///
/// ```
/// use u_opening_hours::{is_syntactically_valid, parse};
///
/// // Legal, but outside what the editable model can represent.
/// assert!(is_syntactically_valid("2024 Mo-Fr 09:00-18:00"));
/// assert!(parse("2024 Mo-Fr 09:00-18:00").is_err());
///
/// assert!(!is_syntactically_valid("Mo-Fr 09:00-"));
/// ```
pub fn is_syntactically_valid(text: &str) -> bool {
    OHParser::parse(Rule::input_opening_hours, text).is_ok()
}
