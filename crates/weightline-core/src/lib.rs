// File: crates/weightline-core/src/lib.rs
// Summary: Core library entry point; exports the weight chart widget API.

pub mod chart;
pub mod config;
pub mod entry;
pub mod scale;
pub mod text;
pub mod theme;
pub mod types;

pub use chart::{TimeSeriesChart, HOVER_RADIUS, NO_HOVER};
pub use config::{ChartConfig, ValueFormat};
pub use entry::{DateInput, TimeSeriesEntry, ValueInput, DATE_FORMAT};
pub use scale::{date_to_x, linspace, scale, value_to_y};
pub use text::TextShaper;
pub use theme::ChartColors;
pub use types::{Insets, PlotArea, HEIGHT, WIDTH};
