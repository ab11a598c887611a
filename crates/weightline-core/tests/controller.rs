// File: crates/weightline-core/tests/controller.rs
// Purpose: Validate the chart controller: load/append ordering, hover state
// machine, hit-testing, and redraw coalescing.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use weightline_core::{
    date_to_x, value_to_y, ChartConfig, Insets, PlotArea, TimeSeriesChart, HEIGHT, WIDTH,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn chart() -> TimeSeriesChart {
    TimeSeriesChart::new(ChartConfig::default())
}

/// Pixel position of entry `i` at the default surface size.
fn position(chart: &TimeSeriesChart, i: usize) -> (f64, f64) {
    let plot = PlotArea::from_surface(&Insets::default(), WIDTH, HEIGHT);
    let entries = chart.entries();
    let (mut min_val, mut max_val) = (f64::INFINITY, f64::NEG_INFINITY);
    for e in entries {
        min_val = min_val.min(e.value);
        max_val = max_val.max(e.value);
    }
    let e = entries[i];
    (
        date_to_x(e.date, plot.left, plot.width, entries[0].date, entries[entries.len() - 1].date),
        value_to_y(e.value, plot.top, plot.height, min_val, max_val),
    )
}

fn record_hovers(chart: &mut TimeSeriesChart) -> Rc<RefCell<Vec<i32>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    chart.connect_hover_changed(move |index| sink.borrow_mut().push(index));
    seen
}

#[test]
fn load_sorts_ascending_by_date() {
    let mut c = chart();
    c.load(vec![("2025-09-02", 72.0), ("2025-09-01", 70.0)]);
    let entries = c.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, date(2025, 9, 1));
    assert_eq!(entries[0].value, 70.0);
    assert_eq!(entries[1].date, date(2025, 9, 2));
    assert_eq!(entries[1].value, 72.0);
}

#[test]
fn load_keeps_equal_dates_in_insertion_order() {
    let mut c = chart();
    c.load(vec![
        ("2025-09-05", 70.0),
        ("2025-09-01", 69.0),
        ("2025-09-05", 71.0),
    ]);
    let values: Vec<f64> = c.entries().iter().map(|e| e.value).collect();
    assert_eq!(values, vec![69.0, 70.0, 71.0]);
}

#[test]
fn load_drops_malformed_rows() {
    let mut c = chart();
    c.load(vec![
        ("2025-09-01", "70"),
        ("not-a-date", "71"),
        ("2025-09-02", "oops"),
    ]);
    assert_eq!(c.entries().len(), 1);
    assert_eq!(c.entries()[0].date, date(2025, 9, 1));
}

#[test]
fn load_replaces_and_resets_hover_silently() {
    let mut c = chart();
    c.load(vec![("2025-09-01", 70.0), ("2025-09-03", 72.0)]);
    let seen = record_hovers(&mut c);

    let (px, py) = position(&c, 0);
    c.handle_pointer_move(px, py);
    assert_eq!(c.hovered(), Some(0));
    assert_eq!(*seen.borrow(), vec![0]);

    c.load(vec![("2025-10-01", 75.0)]);
    assert_eq!(c.hovered(), None);
    // No notification for the reset.
    assert_eq!(*seen.borrow(), vec![0]);
}

#[test]
fn append_inserts_preserving_sort_order() {
    let mut c = chart();
    c.load(vec![("2025-09-01", 70.0), ("2025-09-05", 72.0)]);
    assert!(c.append("2025-09-03", 71.0));
    let dates: Vec<NaiveDate> = c.entries().iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date(2025, 9, 1), date(2025, 9, 3), date(2025, 9, 5)]);
}

#[test]
fn append_equal_date_goes_after_existing() {
    let mut c = chart();
    c.load(vec![("2025-09-01", 70.0), ("2025-09-03", 72.0)]);
    assert!(c.append("2025-09-01", 71.0));
    let values: Vec<f64> = c.entries().iter().map(|e| e.value).collect();
    assert_eq!(values, vec![70.0, 71.0, 72.0]);
}

#[test]
fn append_rejects_malformed_pair() {
    let mut c = chart();
    c.load(vec![("2025-09-01", 70.0)]);
    assert!(!c.append("bogus", 71.0));
    assert!(!c.append("2025-09-02", f64::NAN));
    assert_eq!(c.entries().len(), 1);
}

#[test]
fn pointer_within_threshold_selects_entry() {
    let mut c = chart();
    c.load(vec![
        ("2025-09-01", 70.0),
        ("2025-09-02", 72.0),
        ("2025-09-03", 71.0),
    ]);
    let seen = record_hovers(&mut c);

    let (px, py) = position(&c, 1);
    c.handle_pointer_move(px + 5.0, py - 5.0);
    assert_eq!(c.hovered(), Some(1));
    assert_eq!(*seen.borrow(), vec![1]);

    // Same target again: no duplicate notification.
    c.handle_pointer_move(px + 4.0, py - 4.0);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn pointer_far_from_everything_clears_hover() {
    let mut c = chart();
    c.load(vec![("2025-09-01", 70.0), ("2025-09-03", 72.0)]);
    let seen = record_hovers(&mut c);

    let (px, py) = position(&c, 0);
    c.handle_pointer_move(px, py);
    assert_eq!(c.hovered(), Some(0));

    c.handle_pointer_move(px + 200.0, py);
    assert_eq!(c.hovered(), None);
    assert_eq!(*seen.borrow(), vec![0, -1]);
}

#[test]
fn overlapping_entries_favor_the_first_in_sequence() {
    let mut c = chart();
    // Single-day range: every point collapses onto the left margin.
    c.load(vec![
        ("2025-09-10", 70.0),
        ("2025-09-10", 70.0),
        ("2025-09-10", 75.0),
    ]);
    let (px, py) = position(&c, 0);
    c.handle_pointer_move(px, py);
    assert_eq!(c.hovered(), Some(0));
}

#[test]
fn first_match_wins_over_nearest_match() {
    let mut c = chart();
    // Two markers ~16 px apart vertically; the pointer sits between them,
    // slightly nearer the second.
    c.load(vec![("2025-09-10", 70.0), ("2025-09-10", 70.1)]);
    let (x0, y0) = position(&c, 0);
    let (x1, y1) = position(&c, 1);
    assert_eq!(x0, x1);

    let py = (y0 + y1) / 2.0 + (y1 - y0).signum();
    assert!((py - y1).abs() < (py - y0).abs());
    c.handle_pointer_move(x0, py);
    assert_eq!(c.hovered(), Some(0));
}

#[test]
fn pointer_leave_resets_and_notifies_once() {
    let mut c = chart();
    c.load(vec![("2025-09-01", 70.0), ("2025-09-03", 72.0)]);
    let seen = record_hovers(&mut c);

    c.handle_pointer_leave();
    assert_eq!(*seen.borrow(), Vec::<i32>::new());

    let (px, py) = position(&c, 1);
    c.handle_pointer_move(px, py);
    c.handle_pointer_leave();
    assert_eq!(c.hovered(), None);
    assert_eq!(*seen.borrow(), vec![1, -1]);

    c.handle_pointer_leave();
    assert_eq!(*seen.borrow(), vec![1, -1]);
}

#[test]
fn pointer_move_is_a_noop_without_entries_or_plot_area() {
    let mut c = chart();
    let seen = record_hovers(&mut c);
    c.handle_pointer_move(200.0, 200.0);
    assert_eq!(c.hovered(), None);
    assert!(seen.borrow().is_empty());

    c.load(vec![("2025-09-01", 70.0)]);
    // Surface smaller than the margins: degenerate plot area.
    c.resize(100, 100);
    c.handle_pointer_move(50.0, 50.0);
    assert_eq!(c.hovered(), None);
    assert!(seen.borrow().is_empty());
}

#[test]
fn redraw_requests_are_coalesced() {
    let mut c = chart();
    assert!(c.take_redraw_request());
    assert!(!c.take_redraw_request());

    c.load(vec![("2025-09-01", 70.0), ("2025-09-03", 72.0)]);
    c.append("2025-09-02", 71.0);
    assert!(c.take_redraw_request());
    assert!(!c.take_redraw_request());

    c.set_dark(false); // unchanged flag
    assert!(!c.take_redraw_request());
    c.set_dark(true);
    assert!(c.take_redraw_request());

    // A pointer move that lands nowhere changes nothing.
    c.handle_pointer_move(0.0, 0.0);
    assert!(!c.take_redraw_request());
}
