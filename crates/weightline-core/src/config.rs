// File: crates/weightline-core/src/config.rs
// Summary: Per-chart configuration: title, axis labels, value format, line color, tooltip.

use chrono::NaiveDate;
use skia_safe::Color4f;

use crate::entry::DATE_FORMAT;

/// Fixed-decimals formatter for value labels (axis ticks and the default
/// tooltip). One decimal matches typical body-weight readouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueFormat {
    pub decimals: usize,
}

impl ValueFormat {
    pub const fn new(decimals: usize) -> Self {
        Self { decimals }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Chart configuration; immutable after construction.
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_format: ValueFormat,
    pub line_color: Color4f,
    /// Overrides the tooltip text when set. The default reads
    /// `<date>\n<y_label>: <formatted value>`.
    pub tooltip_formatter: Option<Box<dyn Fn(NaiveDate, f64) -> String>>,
}

impl ChartConfig {
    /// Tooltip text for an entry, from the custom formatter or the default.
    pub fn tooltip_text(&self, date: NaiveDate, value: f64) -> String {
        match &self.tooltip_formatter {
            Some(format) => format(date, value),
            None => format!(
                "{}\n{}: {}",
                date.format(DATE_FORMAT),
                self.y_label,
                self.y_format.format(value)
            ),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_owned(),
            x_label: "Date".to_owned(),
            y_label: "Value".to_owned(),
            y_format: ValueFormat::default(),
            line_color: Color4f::new(0.2, 0.5, 0.8, 1.0),
            tooltip_formatter: None,
        }
    }
}
