// File: crates/weightline-demo/src/main.rs
// Summary: Demo: reads the JSON config and weight CSV, optionally appends a
// sample, and renders light/dark/tooltip PNGs headlessly.
//
// Usage: weightline-demo [config.json] [--add YYYY-MM-DD WEIGHT]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use std::path::PathBuf;

use weightline_core::{
    date_to_x, value_to_y, ChartConfig, Insets, PlotArea, TimeSeriesChart, ValueFormat, DATE_FORMAT,
    HEIGHT, WIDTH,
};
use weightline_store::{CsvWeightStore, JsonConfigStore, WeightStore};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1).peekable();
    let config_path = if args.peek().is_some_and(|a| a.as_str() != "--add") {
        PathBuf::from(args.next().unwrap())
    } else {
        PathBuf::from("weightline.json")
    };
    let add = parse_add_args(&mut args)?;

    let mut chart = TimeSeriesChart::new(ChartConfig {
        title: "Weight Tracking".to_owned(),
        y_label: "Weight (kg)".to_owned(),
        y_format: ValueFormat::new(1),
        ..ChartConfig::default()
    });
    chart.connect_hover_changed(|index| info!("hover changed: {index}"));

    let store = load_store(&config_path)?;
    if let Some(store) = &store {
        let records = store
            .load_all()
            .with_context(|| format!("failed to load CSV '{}'", store.path().display()))?;
        println!("Loaded {} records from {}", records.len(), store.path().display());
        chart.load(records.into_iter().map(|r| (r.date, r.weight)));
    }

    if let Some((date_str, weight)) = add {
        if chart.append(date_str.as_str(), weight) {
            let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)?;
            if let Some(store) = &store {
                store.append(date, weight)?;
                info!("saved weight: {date_str} - {weight} kg");
            }
        } else {
            warn!("rejected sample: {date_str} - {weight}");
        }
    }

    let out_dir = PathBuf::from("target/out");

    chart.set_dark(false);
    let out_light = out_dir.join("weightline_light.png");
    chart.render_to_png(&out_light, WIDTH, HEIGHT)?;
    println!("Wrote {}", out_light.display());

    chart.set_dark(true);
    let out_dark = out_dir.join("weightline_dark.png");
    chart.render_to_png(&out_dark, WIDTH, HEIGHT)?;
    println!("Wrote {}", out_dark.display());

    // Hover the most recent entry and render the tooltip.
    if let Some(last) = chart.entries().last().copied() {
        let plot = PlotArea::from_surface(&Insets::default(), WIDTH, HEIGHT);
        let first = chart.entries()[0];
        let (min_val, max_val) = chart
            .entries()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
                (lo.min(e.value), hi.max(e.value))
            });
        let px = date_to_x(last.date, plot.left, plot.width, first.date, last.date);
        let py = value_to_y(last.value, plot.top, plot.height, min_val, max_val);

        let _ = chart.take_redraw_request();
        chart.handle_pointer_move(px, py);

        if chart.take_redraw_request() {
            let out_hover = out_dir.join("weightline_hover.png");
            chart.render_to_png(&out_hover, WIDTH, HEIGHT)?;
            println!("Wrote {}", out_hover.display());
        }
    }

    Ok(())
}

/// Open the weight store named by the JSON config, creating a default config
/// on first run. Returns `None` when no data file is configured yet.
fn load_store(config_path: &std::path::Path) -> Result<Option<CsvWeightStore>> {
    let config_store = JsonConfigStore::new(config_path);
    if !config_store.exists() {
        config_store
            .create_default()
            .with_context(|| format!("failed to create '{}'", config_path.display()))?;
        warn!("created default config at {}; no data file configured", config_path.display());
        return Ok(None);
    }

    let config = config_store
        .load()
        .with_context(|| format!("failed to read '{}'", config_path.display()))?;
    let Some(file_csv) = config.file_csv else {
        warn!("no data file configured in {}", config_path.display());
        return Ok(None);
    };
    if !file_csv.exists() {
        warn!("CSV file not found: {}", file_csv.display());
        return Ok(None);
    }
    Ok(Some(CsvWeightStore::new(file_csv)))
}

fn parse_add_args(
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> Result<Option<(String, f64)>> {
    if args.peek().map(String::as_str) != Some("--add") {
        return Ok(None);
    }
    args.next();
    let date = args.next().context("--add requires DATE and WEIGHT")?;
    let weight = args
        .next()
        .context("--add requires DATE and WEIGHT")?
        .parse::<f64>()
        .context("WEIGHT must be a number")?;
    Ok(Some((date, weight)))
}
