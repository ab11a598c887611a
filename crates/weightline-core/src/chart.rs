// File: crates/weightline-core/src/chart.rs
// Summary: Weight chart widget: entry sequence, hover state machine, and the
// full Skia draw pipeline (grid, axes, polyline, markers, tooltip).

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use skia_safe as skia;

use crate::config::ChartConfig;
use crate::entry::{DateInput, TimeSeriesEntry, ValueInput};
use crate::scale::{date_to_x, linspace, scale, value_to_y};
use crate::text::TextShaper;
use crate::theme::ChartColors;
use crate::types::{Insets, PlotArea, HEIGHT, WIDTH};

/// Pointer-to-marker distance (pixels) within which an entry counts as hovered.
pub const HOVER_RADIUS: f64 = 15.0;
/// Hover notification sentinel for "nothing hovered".
pub const NO_HOVER: i32 = -1;

const MARKER_RADIUS: f32 = 4.0;
const NO_DATA_MESSAGE: &str = "No data available";

/// Time-series chart widget for a single weight series.
///
/// The host windowing layer composes this: it forwards pointer events and the
/// system dark-mode flag in, invokes `draw` with its surface, and repaints when
/// `take_redraw_request` reports a pending change. Hover transitions are pushed
/// to registered listeners as an entry index, `NO_HOVER` when the pointer left
/// every marker.
pub struct TimeSeriesChart {
    entries: Vec<TimeSeriesEntry>,
    hovered: Option<usize>,
    config: ChartConfig,
    insets: Insets,
    is_dark: bool,
    width: i32,
    height: i32,
    needs_redraw: bool,
    hover_listeners: Vec<Box<dyn FnMut(i32)>>,
    shaper: TextShaper,
}

impl TimeSeriesChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            entries: Vec::new(),
            hovered: None,
            config,
            insets: Insets::default(),
            is_dark: false,
            width: WIDTH,
            height: HEIGHT,
            needs_redraw: true,
            hover_listeners: Vec::new(),
            shaper: TextShaper::new(),
        }
    }

    /// Entries in ascending date order (insertion-stable among equal dates).
    pub fn entries(&self) -> &[TimeSeriesEntry] {
        &self.entries
    }

    /// Index of the entry under the pointer, if any.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Replace the entry sequence from raw (date, value) pairs. Malformed pairs
    /// are dropped (and logged) by the entry parser; the survivors are sorted
    /// ascending by date with insertion order kept among equal dates. Hover is
    /// reset without notifying listeners.
    pub fn load<I, D, V>(&mut self, rows: I)
    where
        I: IntoIterator<Item = (D, V)>,
        D: Into<DateInput>,
        V: Into<ValueInput>,
    {
        let mut entries: Vec<TimeSeriesEntry> = rows
            .into_iter()
            .filter_map(|(date, value)| TimeSeriesEntry::parse(date, value))
            .collect();
        entries.sort_by_key(|e| e.date);
        self.entries = entries;
        self.hovered = None;
        self.needs_redraw = true;
    }

    /// Parse one pair and insert it keeping the sequence sorted (equivalent to
    /// append-then-stable-sort). Returns whether an entry was added, so hosts
    /// can persist only accepted samples. A parse failure is a no-op.
    pub fn append<D, V>(&mut self, date: D, value: V) -> bool
    where
        D: Into<DateInput>,
        V: Into<ValueInput>,
    {
        let Some(entry) = TimeSeriesEntry::parse(date, value) else {
            return false;
        };
        let at = self.entries.partition_point(|e| e.date <= entry.date);
        self.entries.insert(at, entry);
        self.needs_redraw = true;
        true
    }

    /// Host-reported surface size, used to resolve pointer coordinates.
    pub fn resize(&mut self, width: i32, height: i32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.needs_redraw = true;
        }
    }

    /// Host-reported theme flag; repaints only on an actual change.
    pub fn set_dark(&mut self, is_dark: bool) {
        if self.is_dark != is_dark {
            self.is_dark = is_dark;
            self.needs_redraw = true;
        }
    }

    /// Register a hover observer. Each distinct hover transition produces
    /// exactly one synchronous call with the entry index, or `NO_HOVER`.
    pub fn connect_hover_changed(&mut self, listener: impl FnMut(i32) + 'static) {
        self.hover_listeners.push(Box::new(listener));
    }

    /// Consume the coalesced repaint request. Multiple state changes between
    /// paints collapse into one `true`.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Resolve a pointer position to the hovered entry. The first entry in
    /// sequence order within `HOVER_RADIUS` wins, so overlapping points favor
    /// the date-earliest one.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) {
        if self.entries.is_empty() {
            return;
        }
        let plot = PlotArea::from_surface(&self.insets, self.width, self.height);
        if plot.is_degenerate() {
            return;
        }

        let (min_val, max_val) = self.value_extent();
        let (date_min, date_max) = self.date_extent();
        let threshold_sq = HOVER_RADIUS * HOVER_RADIUS;

        let mut hovered = None;
        for (i, entry) in self.entries.iter().enumerate() {
            let px = date_to_x(entry.date, plot.left, plot.width, date_min, date_max);
            let py = value_to_y(entry.value, plot.top, plot.height, min_val, max_val);
            let dist_sq = (px - x) * (px - x) + (py - y) * (py - y);
            if dist_sq < threshold_sq {
                hovered = Some(i);
                break;
            }
        }
        self.set_hovered(hovered);
    }

    pub fn handle_pointer_leave(&mut self) {
        self.set_hovered(None);
    }

    fn set_hovered(&mut self, hovered: Option<usize>) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        self.needs_redraw = true;
        let index = hovered.map_or(NO_HOVER, |i| i as i32);
        for listener in &mut self.hover_listeners {
            listener(index);
        }
    }

    fn value_extent(&self) -> (f64, f64) {
        let mut min_val = f64::INFINITY;
        let mut max_val = f64::NEG_INFINITY;
        for e in &self.entries {
            min_val = min_val.min(e.value);
            max_val = max_val.max(e.value);
        }
        (min_val, max_val)
    }

    fn date_extent(&self) -> (NaiveDate, NaiveDate) {
        // Sequence is sorted, so the extremes are the ends.
        (self.entries[0].date, self.entries[self.entries.len() - 1].date)
    }

    /// Draw the full chart onto `canvas`. Pure function of current state and
    /// the surface dimensions; never fails. An empty sequence degrades to a
    /// centered message.
    pub fn draw(&self, canvas: &skia::Canvas, width: i32, height: i32) {
        let colors = ChartColors::resolve(self.is_dark);
        canvas.clear(colors.background);

        if self.entries.is_empty() {
            let (tw, _) = self.shaper.measure(NO_DATA_MESSAGE, 16.0, false);
            self.shaper.draw_at(
                canvas,
                NO_DATA_MESSAGE,
                width as f32 / 2.0 - tw / 2.0,
                height as f32 / 2.0,
                16.0,
                colors.text.to_color(),
                false,
            );
            return;
        }

        let plot = PlotArea::from_surface(&self.insets, width, height);
        let (min_val, max_val) = self.value_extent();
        let (date_min, date_max) = self.date_extent();

        self.draw_grid(canvas, &colors, &plot, min_val, max_val, date_min, date_max);
        self.draw_axes(canvas, &colors, &plot);
        self.draw_series(canvas, &plot, min_val, max_val, date_min, date_max);
        self.draw_hover(canvas, &colors, &plot, width, height, min_val, max_val, date_min, date_max);
        self.draw_captions(canvas, &colors, &plot, width);
    }

    /// Render to PNG bytes on a CPU raster surface.
    pub fn render_to_png_bytes(&self, width: i32, height: i32) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), width, height);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(
        &self,
        output_png_path: impl AsRef<std::path::Path>,
        width: i32,
        height: i32,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(width, height)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    // ---- draw helpers -------------------------------------------------------

    fn draw_grid(
        &self,
        canvas: &skia::Canvas,
        colors: &ChartColors,
        plot: &PlotArea,
        min_val: f64,
        max_val: f64,
        date_min: NaiveDate,
        date_max: NaiveDate,
    ) {
        let mut grid_paint = skia::Paint::default();
        grid_paint.set_color(colors.grid.to_color());
        grid_paint.set_anti_alias(true);
        grid_paint.set_style(skia::paint::Style::Stroke);
        grid_paint.set_stroke_width(1.0);

        // Horizontal lines, labeled with the interpolated value.
        for frac in linspace(0.0, 1.0, 6) {
            let y = (plot.top + plot.height - frac * plot.height) as f32;
            canvas.draw_line((plot.left as f32, y), (plot.right() as f32, y), &grid_paint);

            let value = scale(frac, 0.0, 1.0, min_val, max_val);
            let label = self.config.y_format.format(value);
            let (tw, th) = self.shaper.measure(&label, 10.0, false);
            self.shaper.draw_at(
                canvas,
                &label,
                plot.left as f32 - tw - 10.0,
                y - th / 2.0,
                10.0,
                colors.text.to_color(),
                false,
            );
        }

        // Vertical lines, labeled with the interpolated date (day/month).
        let days_total = (date_max - date_min).num_days().max(1);
        for frac in linspace(0.0, 1.0, 6) {
            let x = (plot.left + frac * plot.width) as f32;
            canvas.draw_line((x, plot.top as f32), (x, plot.bottom() as f32), &grid_paint);

            let date = date_min + Duration::days((frac * days_total as f64) as i64);
            let label = date.format("%d/%m").to_string();
            let (tw, _) = self.shaper.measure(&label, 10.0, false);
            self.shaper.draw_at(
                canvas,
                &label,
                x - tw / 2.0,
                plot.bottom() as f32 + 10.0,
                10.0,
                colors.text.to_color(),
                false,
            );
        }
    }

    fn draw_axes(&self, canvas: &skia::Canvas, colors: &ChartColors, plot: &PlotArea) {
        let mut axis_paint = skia::Paint::default();
        axis_paint.set_color(colors.axes.to_color());
        axis_paint.set_anti_alias(true);
        axis_paint.set_style(skia::paint::Style::Stroke);
        axis_paint.set_stroke_width(2.0);

        // Left and bottom axes as a single path.
        let mut builder = skia::PathBuilder::new();
        builder.move_to((plot.left as f32, plot.top as f32));
        builder.line_to((plot.left as f32, plot.bottom() as f32));
        builder.line_to((plot.right() as f32, plot.bottom() as f32));
        let path = builder.detach();
        canvas.draw_path(&path, &axis_paint);
    }

    fn draw_series(
        &self,
        canvas: &skia::Canvas,
        plot: &PlotArea,
        min_val: f64,
        max_val: f64,
        date_min: NaiveDate,
        date_max: NaiveDate,
    ) {
        let positions: Vec<(f32, f32)> = self
            .entries
            .iter()
            .map(|e| {
                (
                    date_to_x(e.date, plot.left, plot.width, date_min, date_max) as f32,
                    value_to_y(e.value, plot.top, plot.height, min_val, max_val) as f32,
                )
            })
            .collect();

        if positions.len() >= 2 {
            let mut builder = skia::PathBuilder::new();
            builder.move_to(positions[0]);
            for &p in positions.iter().skip(1) {
                builder.line_to(p);
            }
            let path = builder.detach();

            let mut stroke = skia::Paint::default();
            stroke.set_anti_alias(true);
            stroke.set_style(skia::paint::Style::Stroke);
            stroke.set_stroke_width(3.0);
            stroke.set_color(self.config.line_color.to_color());
            canvas.draw_path(&path, &stroke);
        }

        let mut marker = skia::Paint::default();
        marker.set_anti_alias(true);
        marker.set_style(skia::paint::Style::Fill);
        marker.set_color(self.config.line_color.to_color());
        for &p in &positions {
            canvas.draw_circle(p, MARKER_RADIUS, &marker);
        }
    }

    fn draw_hover(
        &self,
        canvas: &skia::Canvas,
        colors: &ChartColors,
        plot: &PlotArea,
        width: i32,
        height: i32,
        min_val: f64,
        max_val: f64,
        date_min: NaiveDate,
        date_max: NaiveDate,
    ) {
        let Some(entry) = self.hovered.and_then(|i| self.entries.get(i)) else {
            return;
        };
        let x = date_to_x(entry.date, plot.left, plot.width, date_min, date_max);
        let y = value_to_y(entry.value, plot.top, plot.height, min_val, max_val);

        // Ring in the background color, then a filled highlight.
        let mut ring = skia::Paint::default();
        ring.set_anti_alias(true);
        ring.set_style(skia::paint::Style::Stroke);
        ring.set_stroke_width(2.0);
        ring.set_color(colors.background.to_color());
        canvas.draw_circle((x as f32, y as f32), 8.0, &ring);

        let mut highlight = skia::Paint::default();
        highlight.set_anti_alias(true);
        highlight.set_style(skia::paint::Style::Fill);
        highlight.set_color(self.config.line_color.to_color());
        canvas.draw_circle((x as f32, y as f32), 7.0, &highlight);

        // Tooltip above the point, clamped at least 10 px inside the surface.
        let text = self.config.tooltip_text(entry.date, entry.value);
        let (lw, lh) = self.shaper.measure(&text, 12.0, false);
        let (lw, lh) = (lw as f64, lh as f64);
        let tx = (x - lw / 2.0).min(width as f64 - lw - 20.0).max(10.0);
        let ty = (y - lh - 15.0).min(height as f64 - lh - 20.0).max(10.0);

        let rect = skia::Rect::from_xywh(
            (tx - 8.0) as f32,
            (ty - 8.0) as f32,
            (lw + 16.0) as f32,
            (lh + 12.0) as f32,
        );

        let mut bg = skia::Paint::default();
        bg.set_anti_alias(true);
        bg.set_style(skia::paint::Style::Fill);
        bg.set_color(colors.tooltip_bg.to_color());
        canvas.draw_rect(rect, &bg);

        let mut border = skia::Paint::default();
        border.set_anti_alias(true);
        border.set_style(skia::paint::Style::Stroke);
        border.set_stroke_width(1.0);
        border.set_color(colors.tooltip_border.to_color());
        canvas.draw_rect(rect, &border);

        self.shaper.draw_at(
            canvas,
            &text,
            tx as f32,
            (ty + 2.0) as f32,
            12.0,
            colors.tooltip_text.to_color(),
            false,
        );
    }

    fn draw_captions(&self, canvas: &skia::Canvas, colors: &ChartColors, plot: &PlotArea, width: i32) {
        let text_color = colors.text.to_color();

        let (tw, th) = self.shaper.measure(&self.config.title, 16.0, true);
        self.shaper.draw_at(
            canvas,
            &self.config.title,
            width as f32 / 2.0 - tw / 2.0,
            plot.top as f32 - th - 20.0,
            16.0,
            text_color,
            true,
        );

        let (tw, _) = self.shaper.measure(&self.config.x_label, 12.0, true);
        self.shaper.draw_at(
            canvas,
            &self.config.x_label,
            (plot.left + plot.width / 2.0) as f32 - tw / 2.0,
            plot.bottom() as f32 + 40.0,
            12.0,
            text_color,
            true,
        );

        let (_, th) = self.shaper.measure(&self.config.y_label, 12.0, true);
        self.shaper.draw_at(
            canvas,
            &self.config.y_label,
            plot.left as f32,
            plot.top as f32 - th - 10.0,
            12.0,
            text_color,
            true,
        );
    }
}
