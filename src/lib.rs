//! Rate-change simulation engine
//!
//! Takes a base book of quotes, applies a rate change to one factor, re-encodes
//! the features against a fitted model's schema and recomputes expected
//! premium differences, then reports grouped actual-vs-expected summaries,
//! loss ratio and holdout error.

pub mod config;
pub mod error;
pub mod records;
pub mod features;
pub mod model;
pub mod engine;
pub mod report;

pub use config::DashboardConfig;
pub use error::{RateError, Result};
pub use records::{Adjustment, AdjustmentKind, RecordSet, Value};
pub use features::{align, encode, encode_with, CategoryVocabulary, EncodedMatrix};
pub use model::{ModelArtifact, ModelSource, ModelStore, Predictor};
pub use engine::{recompute, recompute_with, Session, EXPECTED_COLUMN};
pub use report::{loss_ratio, summarize, AggregationResult, HoldoutSplit};
