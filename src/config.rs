//! Dashboard configuration loaded from JSON
//!
//! Every field has a default matching the synthetic quote book, so an empty
//! `{}` file is a valid configuration.

use crate::error::Result;
use crate::records::generator::{CATEGORICAL_COLUMNS, EXPOSURE_COLUMN, TARGET_COLUMN};
use crate::records::{Adjustment, SyntheticParams};
use crate::report::metrics::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// CSV record set; synthetic data is generated when absent
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Model artifact path or URL
    #[serde(default)]
    pub model: Option<String>,

    /// Columns one-hot encoded when the model has no stored vocabulary
    #[serde(default = "default_categorical_columns")]
    pub categorical_columns: Vec<String>,

    /// Observed target column compared against `Expected`
    #[serde(default = "default_actual_column")]
    pub actual_column: String,

    /// Dimension for the actual-vs-expected report
    #[serde(default = "default_group_column")]
    pub group_column: String,

    /// Share of rows held out for the error metric (0.0 to 1.0)
    #[serde(default = "default_holdout_fraction")]
    pub holdout_fraction: f64,

    /// Seed for synthetic data and the holdout split
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_synthetic_rows")]
    pub synthetic_rows: usize,

    /// Scenario applied on start-up
    #[serde(default)]
    pub adjustment: Option<Adjustment>,
}

fn default_categorical_columns() -> Vec<String> {
    CATEGORICAL_COLUMNS.iter().map(|c| c.to_string()).collect()
}
fn default_actual_column() -> String { TARGET_COLUMN.to_string() }
fn default_group_column() -> String { EXPOSURE_COLUMN.to_string() }
fn default_holdout_fraction() -> f64 { DEFAULT_TEST_FRACTION }
fn default_seed() -> u64 { DEFAULT_SPLIT_SEED }
fn default_synthetic_rows() -> usize { 1000 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            model: None,
            categorical_columns: default_categorical_columns(),
            actual_column: default_actual_column(),
            group_column: default_group_column(),
            holdout_fraction: default_holdout_fraction(),
            seed: default_seed(),
            synthetic_rows: default_synthetic_rows(),
            adjustment: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Generator parameters implied by this configuration
    pub fn synthetic_params(&self) -> SyntheticParams {
        SyntheticParams {
            n_rows: self.synthetic_rows,
            seed: self.seed,
        }
    }
}
