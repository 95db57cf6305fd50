//! Align encoded features with a model's expected schema

use super::EncodedMatrix;
use crate::error::{RateError, Result};
use std::collections::HashSet;

/// Reorder `matrix` to exactly `expected_columns`.
///
/// Missing columns are zero-filled, extra columns are dropped and rows are
/// left untouched.
pub fn align<S: AsRef<str>>(matrix: &EncodedMatrix, expected_columns: &[S]) -> Result<EncodedMatrix> {
    if expected_columns.is_empty() {
        return Err(RateError::SchemaMismatch(
            "model schema has no expected features".to_string(),
        ));
    }
    if matrix.n_rows() == 0 {
        return Err(RateError::SchemaMismatch(
            "cannot align a matrix with zero rows".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(expected_columns.len());
    for name in expected_columns {
        if !seen.insert(name.as_ref()) {
            return Err(RateError::SchemaMismatch(format!(
                "expected feature '{}' listed more than once",
                name.as_ref()
            )));
        }
    }

    let mut source = matrix.clone();
    let mut inserted = 0usize;
    let mut columns = Vec::with_capacity(expected_columns.len());
    for name in expected_columns {
        let name = name.as_ref();
        let values = match source.take_column(name) {
            Some(values) => values,
            None => {
                inserted += 1;
                vec![0.0; matrix.n_rows()]
            }
        };
        columns.push((name.to_string(), values));
    }

    log::debug!(
        "Aligned {} features: {} zero-filled, {} dropped",
        columns.len(),
        inserted,
        source.n_cols()
    );
    Ok(EncodedMatrix::from_columns(matrix.n_rows(), columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::encode;
    use crate::records::{RecordSet, Value};

    fn matrix() -> EncodedMatrix {
        let mut m = EncodedMatrix::with_rows(2);
        m.push_column("b", vec![1.0, 2.0]).unwrap();
        m.push_column("extra", vec![9.0, 9.0]).unwrap();
        m.push_column("a", vec![3.0, 4.0]).unwrap();
        m
    }

    #[test]
    fn test_reorders_fills_and_drops() {
        let aligned = align(&matrix(), &["a", "missing", "b"]).unwrap();
        assert_eq!(aligned.names(), &["a", "missing", "b"]);
        assert_eq!(aligned.row(0), vec![3.0, 0.0, 1.0]);
        assert_eq!(aligned.row(1), vec![4.0, 0.0, 2.0]);
        assert!(aligned.column("extra").is_none());
    }

    #[test]
    fn test_align_after_encode_matches_schema() {
        let records = RecordSet::from_pairs(vec![
            vec![("region", Value::from("West")), ("x", Value::from(1.0))],
            vec![("region", Value::from("East")), ("x", Value::from(2.0))],
        ])
        .unwrap();
        let schema = ["region_North", "x", "region_West", "region_South"];
        let aligned = align(&encode(&records, &["region"]), &schema).unwrap();

        assert_eq!(aligned.names(), &schema);
        assert_eq!(aligned.n_rows(), 2);
        assert_eq!(aligned.row(0), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(align(&matrix(), &empty), Err(RateError::SchemaMismatch(_))));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let result = align(&EncodedMatrix::with_rows(0), &["a"]);
        assert!(matches!(result, Err(RateError::SchemaMismatch(_))));
    }

    #[test]
    fn test_duplicate_schema_rejected() {
        assert!(matches!(align(&matrix(), &["a", "a"]), Err(RateError::SchemaMismatch(_))));
    }
}
