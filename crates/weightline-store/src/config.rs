// File: crates/weightline-store/src/config.rs
// Summary: JSON key-value app configuration (path to the weight CSV).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The whole configuration file. Unset keys are omitted on disk, so a default
/// config serializes to `{}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_csv: Option<PathBuf>,
}

/// JSON-file-backed configuration store.
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write an empty configuration (`{}`).
    pub fn create_default(&self) -> Result<()> {
        self.write(&AppConfig::default())
    }

    pub fn load(&self) -> Result<AppConfig> {
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Record the weight CSV location, stored as an absolute path.
    pub fn save(&self, file_csv: &Path) -> Result<()> {
        let absolute = std::path::absolute(file_csv)?;
        self.write(&AppConfig { file_csv: Some(absolute) })
    }

    fn write(&self, config: &AppConfig) -> Result<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, config)?;
        Ok(())
    }
}
