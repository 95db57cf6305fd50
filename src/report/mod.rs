//! Aggregation and KPI reporting

pub mod summary;
pub mod metrics;

pub use summary::{format_table, summarize, AggregationResult, GroupSummary};
pub use metrics::{holdout_mse, loss_ratio, mean_squared_error, HoldoutSplit};
