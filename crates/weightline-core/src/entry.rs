// File: crates/weightline-core/src/entry.rs
// Summary: Validated (date, value) samples parsed from loosely-typed input.

use chrono::NaiveDate;
use log::warn;

/// Date format accepted from textual input and used for tooltip/CSV output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw date input: already a calendar date, or text in `YYYY-MM-DD` form.
#[derive(Clone, Debug, PartialEq)]
pub enum DateInput {
    Calendar(NaiveDate),
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self { Self::Calendar(date) }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self { Self::Text(text.to_owned()) }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self { Self::Text(text) }
}

/// Raw value input: already a number, or text that should parse as one.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueInput {
    Number(f64),
    Text(String),
}

impl From<f64> for ValueInput {
    fn from(value: f64) -> Self { Self::Number(value) }
}

impl From<f32> for ValueInput {
    fn from(value: f32) -> Self { Self::Number(value as f64) }
}

impl From<i32> for ValueInput {
    fn from(value: i32) -> Self { Self::Number(value as f64) }
}

impl From<&str> for ValueInput {
    fn from(text: &str) -> Self { Self::Text(text.to_owned()) }
}

impl From<String> for ValueInput {
    fn from(text: String) -> Self { Self::Text(text) }
}

/// One point of the weight time series. Immutable once constructed;
/// `value` is always finite and `date` a valid calendar date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSeriesEntry {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesEntry {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Parse a loosely-typed pair into an entry. A malformed date, a
    /// non-numeric value, or a non-finite number yields `None`; failures are
    /// logged and never raised to the caller.
    pub fn parse(date: impl Into<DateInput>, value: impl Into<ValueInput>) -> Option<Self> {
        let date = match date.into() {
            DateInput::Calendar(date) => date,
            DateInput::Text(text) => match NaiveDate::parse_from_str(&text, DATE_FORMAT) {
                Ok(date) => date,
                Err(err) => {
                    warn!("dropping sample with malformed date {text:?}: {err}");
                    return None;
                }
            },
        };
        let value = match value.into() {
            ValueInput::Number(value) => value,
            ValueInput::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => value,
                Err(err) => {
                    warn!("dropping sample for {date} with non-numeric value {text:?}: {err}");
                    return None;
                }
            },
        };
        if !value.is_finite() {
            warn!("dropping sample for {date} with non-finite value {value}");
            return None;
        }
        Some(Self { date, value })
    }
}
