//! Pest grammar shared by the structural parser and the syntax check.
//!
//! `Rule::input_opening_hours` accepts the whole `opening_hours` language;
//! `Rule::input_week_schedule` accepts only the weekly subset that
//! [`crate::parse`] builds schedules from.

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub(crate) struct OHParser;
