//! Error types for the rate-change engine

use thiserror::Error;

/// Errors raised while adjusting, encoding, predicting or reporting
#[derive(Debug, Error)]
pub enum RateError {
    /// An adjustment or grouping referenced a column the record set does not have
    #[error("column '{0}' not found in record set")]
    ColumnNotFound(String),

    /// The model schema cannot be used to align the encoded features
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The model returned a different number of predictions than rows supplied
    #[error("model returned {predictions} predictions for {rows} rows")]
    PredictionLengthMismatch { rows: usize, predictions: usize },

    /// Model artifact could not be read, downloaded or decoded
    #[error("failed to load model from '{source_name}': {reason}")]
    ModelLoad { source_name: String, reason: String },

    /// Ratio metric with a zero denominator
    #[error("cannot compute {0}: denominator is zero")]
    DivisionByZero(&'static str),

    #[error("column '{column}' holds a non-numeric value at row {row}")]
    NonNumericValue { column: String, row: usize },

    #[error("{0} requires at least one value")]
    EmptyInput(&'static str),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RateError {
    pub(crate) fn model_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        RateError::ModelLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Validation errors reject a single user action and leave state untouched.
    /// Everything else aborts the current operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RateError::ColumnNotFound(_) | RateError::NonNumericValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(RateError::ColumnNotFound("X".into()).is_recoverable());
        assert!(!RateError::SchemaMismatch("empty".into()).is_recoverable());
        assert!(!RateError::PredictionLengthMismatch { rows: 2, predictions: 1 }.is_recoverable());
        assert!(!RateError::model_load("model.json", "missing").is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = RateError::PredictionLengthMismatch { rows: 3, predictions: 2 };
        assert_eq!(err.to_string(), "model returned 2 predictions for 3 rows");

        let err = RateError::ColumnNotFound("Premium".into());
        assert_eq!(err.to_string(), "column 'Premium' not found in record set");
    }
}
