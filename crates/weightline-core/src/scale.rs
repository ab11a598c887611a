// File: crates/weightline-core/src/scale.rs
// Summary: Pure pixel-mapping functions for the date/value domain, plus tick layout.

use chrono::NaiveDate;

/// Linear interpolation of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
/// A degenerate input domain (`in_min == in_max`) maps everything to the middle
/// of the output range instead of dividing by zero.
pub fn scale(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return (out_min + out_max) / 2.0;
    }
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Map a date onto `[margin_left, margin_left + plot_width]` by elapsed days
/// over the total days in range. A zero-width date range is widened to one day,
/// which collapses every point onto `margin_left`.
pub fn date_to_x(
    date: NaiveDate,
    margin_left: f64,
    plot_width: f64,
    date_min: NaiveDate,
    date_max: NaiveDate,
) -> f64 {
    let days_total = (date_max - date_min).num_days().max(1) as f64;
    let days_elapsed = (date - date_min).num_days() as f64;
    scale(days_elapsed, 0.0, days_total, margin_left, margin_left + plot_width)
}

/// Map a value onto `[margin_top, margin_top + plot_height]`, inverted so larger
/// values sit higher on screen. The mapped domain is padded by one unit on both
/// ends so the extreme data points never touch the plot edge.
pub fn value_to_y(
    value: f64,
    margin_top: f64,
    plot_height: f64,
    min_val: f64,
    max_val: f64,
) -> f64 {
    margin_top + plot_height - scale(value, min_val - 1.0, max_val + 1.0, 0.0, plot_height)
}

/// `steps` evenly spaced positions from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}
