// File: crates/weightline-store/src/weight.rs
// Summary: Weight record persistence over a plain `date,weight` CSV file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One persisted row. The date stays textual here; parsing/validation is the
/// chart entry model's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: String,
    pub weight: f64,
}

/// Weight persistence seam; the app only ever reads everything or appends one row.
pub trait WeightStore {
    fn exists(&self) -> bool;
    fn load_all(&self) -> Result<Vec<WeightRecord>>;
    fn append(&self, date: NaiveDate, weight: f64) -> Result<()>;
}

/// CSV-backed store. The file is `date,weight` with a header row; an append to
/// a missing file writes the header first.
pub struct CsvWeightStore {
    path: PathBuf,
}

impl CsvWeightStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WeightStore for CsvWeightStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load_all(&self) -> Result<Vec<WeightRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        info!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn append(&self, date: NaiveDate, weight: f64) -> Result<()> {
        let write_header = !self.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer.write_record(["date", "weight"])?;
        }
        writer.serialize((date.format(DATE_FORMAT).to_string(), weight))?;
        writer.flush()?;
        Ok(())
    }
}
