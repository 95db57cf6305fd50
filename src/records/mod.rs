//! Record sets, CSV loading, synthetic data and rate adjustments

mod data;
pub mod loader;
pub mod generator;
pub mod adjuster;

pub use data::{RecordSet, Value};
pub use loader::{load_records, load_records_from_reader, write_records};
pub use generator::{SyntheticGenerator, SyntheticParams, CATEGORICAL_COLUMNS, TARGET_COLUMN};
pub use adjuster::{apply_adjustment, Adjustment, AdjustmentKind};
