//! Expected-value recomputation: encode, align, predict, attach

use super::EXPECTED_COLUMN;
use crate::error::{RateError, Result};
use crate::features::vocabulary::INFERRED_VERSION;
use crate::features::{align, encode_with, CategoryVocabulary};
use crate::model::Predictor;
use crate::records::{RecordSet, Value};
use std::time::Instant;

/// Recompute `Expected` using a vocabulary inferred from `records`
pub fn recompute<P, S>(records: &RecordSet, model: &P, categorical_columns: &[S]) -> Result<RecordSet>
where
    P: Predictor + ?Sized,
    S: AsRef<str>,
{
    let vocabulary = CategoryVocabulary::fit(records, categorical_columns, INFERRED_VERSION);
    recompute_with(records, model, &vocabulary)
}

/// Recompute `Expected` against a fixed vocabulary.
///
/// Returns a copy of `records` whose `Expected` column holds one prediction
/// per row, in row order. An existing `Expected` column is overwritten.
pub fn recompute_with<P>(
    records: &RecordSet,
    model: &P,
    vocabulary: &CategoryVocabulary,
) -> Result<RecordSet>
where
    P: Predictor + ?Sized,
{
    let start = Instant::now();

    let encoded = encode_with(records, vocabulary);
    let aligned = align(&encoded, model.expected_features())?;
    let predictions = model.predict(&aligned)?;

    if predictions.len() != records.len() {
        return Err(RateError::PredictionLengthMismatch {
            rows: records.len(),
            predictions: predictions.len(),
        });
    }

    let mut scored = records.clone();
    scored.upsert_column(
        EXPECTED_COLUMN,
        predictions.into_iter().map(Value::Number).collect(),
    )?;

    log::debug!(
        "Recomputed {} expected values in {:?}",
        scored.len(),
        start.elapsed()
    );
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::EncodedMatrix;
    use crate::model::LinearModel;

    fn records() -> RecordSet {
        RecordSet::from_pairs(vec![
            vec![("X", Value::from(10.0)), ("cat", Value::from("A"))],
            vec![("X", Value::from(20.0)), ("cat", Value::from("B"))],
            vec![("X", Value::from(30.0)), ("cat", Value::from("C"))],
        ])
        .unwrap()
    }

    fn model() -> LinearModel {
        LinearModel {
            feature_names: vec!["cat_C".into(), "X".into(), "cat_Z".into()],
            intercept: 1.0,
            coefficients: vec![100.0, 2.0, 1000.0],
        }
    }

    /// Returns one prediction fewer than requested
    struct ShortModel(Vec<String>);

    impl Predictor for ShortModel {
        fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>> {
            Ok(vec![0.0; matrix.n_rows().saturating_sub(1)])
        }

        fn expected_features(&self) -> &[String] {
            &self.0
        }
    }

    #[test]
    fn test_recompute_attaches_expected() {
        let scored = recompute(&records(), &model(), &["cat"]).unwrap();
        assert_eq!(scored.len(), 3);
        assert_eq!(
            scored.numeric_column(EXPECTED_COLUMN).unwrap(),
            vec![21.0, 41.0, 161.0]
        );
        assert_eq!(scored.value(2, "cat"), Some(&Value::from("C")));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let once = recompute(&records(), &model(), &["cat"]).unwrap();
        let twice = recompute(&once, &model(), &["cat"]).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.columns().len(), 3);
    }

    #[test]
    fn test_input_untouched() {
        let base = records();
        let _ = recompute(&base, &model(), &["cat"]).unwrap();
        assert!(!base.has_column(EXPECTED_COLUMN));
    }

    #[test]
    fn test_prediction_length_mismatch() {
        let model = ShortModel(vec!["X".into()]);
        let result = recompute(&records(), &model, &["cat"]);
        assert!(matches!(
            result,
            Err(RateError::PredictionLengthMismatch { rows: 3, predictions: 2 })
        ));
    }

    #[test]
    fn test_empty_schema_is_schema_mismatch() {
        let model = ShortModel(vec![]);
        let result = recompute(&records(), &model, &["cat"]);
        assert!(matches!(result, Err(RateError::SchemaMismatch(_))));
    }
}
