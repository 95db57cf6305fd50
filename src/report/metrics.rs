//! Scalar KPIs: loss ratio and holdout mean squared error

use crate::error::{RateError, Result};
use crate::records::RecordSet;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default share of rows held out for error measurement
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default seed for the holdout shuffle
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// 100 × Σexpected / Σactual.
///
/// A zero actual sum is an error. A negative actual sum (possible after large
/// negative adjustments) returns the signed ratio.
pub fn loss_ratio(records: &RecordSet, actual_column: &str, expected_column: &str) -> Result<f64> {
    let actual: f64 = records.numeric_column(actual_column)?.iter().sum();
    let expected: f64 = records.numeric_column(expected_column)?.iter().sum();

    if actual == 0.0 {
        return Err(RateError::DivisionByZero("loss ratio"));
    }
    if actual < 0.0 {
        log::warn!(
            "Actual total for '{}' is negative ({:.2}); loss ratio sign is inverted",
            actual_column,
            actual
        );
    }
    Ok(100.0 * expected / actual)
}

/// Mean of squared differences between two equal-length series
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(RateError::PredictionLengthMismatch {
            rows: actual.len(),
            predictions: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(RateError::EmptyInput("mean squared error"));
    }
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(total / actual.len() as f64)
}

/// Deterministic train/test partition of row indices
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutSplit {
    n_rows: usize,
    train: Vec<usize>,
    test: Vec<usize>,
}

impl HoldoutSplit {
    /// Shuffle `0..n_rows` with a seeded RNG and hold out `ceil(n × fraction)` rows.
    /// Non-empty data always keeps at least one test row.
    pub fn new(n_rows: usize, test_fraction: f64, seed: u64) -> Self {
        let mut indices: Vec<usize> = (0..n_rows).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let fraction = if test_fraction.is_finite() {
            test_fraction.clamp(0.0, 1.0)
        } else {
            DEFAULT_TEST_FRACTION
        };
        let n_test = if n_rows == 0 {
            0
        } else {
            ((n_rows as f64 * fraction).ceil() as usize).clamp(1, n_rows)
        };

        let mut test = indices[..n_test].to_vec();
        let mut train = indices[n_test..].to_vec();
        test.sort_unstable();
        train.sort_unstable();

        Self { n_rows, train, test }
    }

    pub fn train(&self) -> &[usize] {
        &self.train
    }

    pub fn test(&self) -> &[usize] {
        &self.test
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }
}

/// Mean squared error of `expected_column` against `actual_column` on the test rows
pub fn holdout_mse(
    records: &RecordSet,
    split: &HoldoutSplit,
    actual_column: &str,
    expected_column: &str,
) -> Result<f64> {
    if split.n_rows() != records.len() {
        return Err(RateError::SchemaMismatch(format!(
            "holdout split covers {} rows, records have {}",
            split.n_rows(),
            records.len()
        )));
    }
    let test_rows = records.select_rows(split.test());
    let actual = test_rows.numeric_column(actual_column)?;
    let expected = test_rows.numeric_column(expected_column)?;
    mean_squared_error(&actual, &expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Value;
    use approx::assert_relative_eq;

    fn records(pairs: &[(f64, f64)]) -> RecordSet {
        RecordSet::from_pairs(pairs.iter().map(|&(a, e)| {
            vec![("act", Value::from(a)), ("exp", Value::from(e))]
        }))
        .unwrap()
    }

    #[test]
    fn test_loss_ratio() {
        let r = records(&[(40.0, 50.0), (60.0, 70.0)]);
        assert_eq!(loss_ratio(&r, "act", "exp").unwrap(), 120.0);
    }

    #[test]
    fn test_loss_ratio_zero_denominator() {
        let r = records(&[(10.0, 5.0), (-10.0, 5.0)]);
        assert!(matches!(
            loss_ratio(&r, "act", "exp"),
            Err(RateError::DivisionByZero(_))
        ));

        let empty = RecordSet::new(vec!["act".into(), "exp".into()]);
        assert!(loss_ratio(&empty, "act", "exp").is_err());
    }

    #[test]
    fn test_loss_ratio_negative_denominator() {
        let r = records(&[(-50.0, 25.0)]);
        assert_relative_eq!(loss_ratio(&r, "act", "exp").unwrap(), -50.0);
    }

    #[test]
    fn test_mse() {
        assert_relative_eq!(
            mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 4.0, 0.0]).unwrap(),
            13.0 / 3.0
        );
        assert!(matches!(
            mean_squared_error(&[1.0], &[1.0, 2.0]),
            Err(RateError::PredictionLengthMismatch { .. })
        ));
        assert!(matches!(
            mean_squared_error(&[], &[]),
            Err(RateError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_split_is_deterministic_and_disjoint() {
        let split = HoldoutSplit::new(100, 0.2, 42);
        assert_eq!(split, HoldoutSplit::new(100, 0.2, 42));
        assert_eq!(split.test().len(), 20);
        assert_eq!(split.train().len(), 80);
        assert!(split.test().iter().all(|i| !split.train().contains(i)));

        let other = HoldoutSplit::new(100, 0.2, 7);
        assert_ne!(split.test(), other.test());
    }

    #[test]
    fn test_split_sizes_round_up() {
        assert_eq!(HoldoutSplit::new(11, 0.2, 1).test().len(), 3);
        assert_eq!(HoldoutSplit::new(3, 0.0, 1).test().len(), 1);
        assert_eq!(HoldoutSplit::new(0, 0.2, 1).test().len(), 0);
    }

    #[test]
    fn test_holdout_mse_uses_test_rows() {
        let r = records(&[(1.0, 1.0), (2.0, 2.0), (3.0, 5.0), (4.0, 4.0)]);
        let split = HoldoutSplit::new(4, 1.0, 3);
        assert_relative_eq!(holdout_mse(&r, &split, "act", "exp").unwrap(), 1.0);

        let wrong = HoldoutSplit::new(5, 0.2, 3);
        assert!(holdout_mse(&r, &wrong, "act", "exp").is_err());
    }
}
