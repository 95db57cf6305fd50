//! One-hot encoding of record sets into numeric features

use super::vocabulary::{indicator_name, CategoryVocabulary, INFERRED_VERSION};
use super::EncodedMatrix;
use crate::records::RecordSet;

/// Encode with a vocabulary inferred from `records` itself.
///
/// Each categorical column expands to one indicator per observed category,
/// minus the sorted-first reference category.
pub fn encode<S: AsRef<str>>(records: &RecordSet, categorical_columns: &[S]) -> EncodedMatrix {
    let vocabulary = CategoryVocabulary::fit(records, categorical_columns, INFERRED_VERSION);
    encode_with(records, &vocabulary)
}

/// Encode against a fixed vocabulary.
///
/// Values unknown to the vocabulary encode like the reference level (all
/// indicators zero). Non-categorical columns holding text are dropped.
pub fn encode_with(records: &RecordSet, vocabulary: &CategoryVocabulary) -> EncodedMatrix {
    let n_rows = records.len();
    let mut columns: Vec<(String, Vec<f64>)> = Vec::new();

    for (idx, name) in records.columns().iter().enumerate() {
        if let Some(categorical) = vocabulary.column(name) {
            let indicators = categorical.indicator_categories();
            let mut values = vec![vec![0.0; n_rows]; indicators.len()];
            let mut unknown = 0usize;

            for (row, cells) in records.rows().enumerate() {
                let label = cells[idx].label();
                if let Some(pos) = indicators.iter().position(|c| *c == label) {
                    values[pos][row] = 1.0;
                } else if categorical.reference() != Some(label.as_str()) {
                    unknown += 1;
                }
            }

            if unknown > 0 {
                log::warn!(
                    "{} values in '{}' are not in vocabulary {}; encoded as reference level",
                    unknown,
                    name,
                    vocabulary.version
                );
            }

            for (category, column) in indicators.iter().zip(values) {
                columns.push((indicator_name(name, category), column));
            }
            continue;
        }

        let numeric: Option<Vec<f64>> = records.rows().map(|cells| cells[idx].as_f64()).collect();
        match numeric {
            Some(values) => columns.push((name.clone(), values)),
            None => log::warn!("Dropping non-numeric column '{}' not declared categorical", name),
        }
    }

    for missing in vocabulary
        .column_names()
        .into_iter()
        .filter(|c| !records.has_column(c))
    {
        log::warn!("Vocabulary column '{}' missing from records", missing);
    }

    EncodedMatrix::from_columns(n_rows, columns)
}
