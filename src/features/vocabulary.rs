//! Categorical vocabulary shared between fitting and inference
//!
//! The vocabulary fixes, per categorical column, the ordered list of known
//! categories. The first entry is the reference level and gets no indicator
//! column. Encoding against a stored vocabulary keeps the feature set stable
//! no matter which categories happen to appear in the data being scored.

use crate::records::{RecordSet, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Version tag used when a vocabulary is fitted on the fly
pub const INFERRED_VERSION: &str = "inferred";

fn default_version() -> String {
    INFERRED_VERSION.to_string()
}

/// Known categories of one column, sorted; the first is the reference level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

impl CategoricalColumn {
    pub fn reference(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    /// Categories that get an indicator column (all but the reference)
    pub fn indicator_categories(&self) -> &[String] {
        self.categories.get(1..).unwrap_or(&[])
    }

    /// `<column>_<category>` for every non-reference category
    pub fn indicator_names(&self) -> Vec<String> {
        self.indicator_categories()
            .iter()
            .map(|c| indicator_name(&self.name, c))
            .collect()
    }
}

pub fn indicator_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

/// Versioned set of categorical columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    #[serde(default = "default_version")]
    pub version: String,

    pub columns: Vec<CategoricalColumn>,
}

impl CategoryVocabulary {
    pub fn new(version: impl Into<String>, columns: Vec<CategoricalColumn>) -> Self {
        Self {
            version: version.into(),
            columns,
        }
    }

    /// Collect the distinct values of each named column, in sorted order.
    /// Columns missing from `records` are skipped.
    pub fn fit<S: AsRef<str>>(
        records: &RecordSet,
        categorical_columns: &[S],
        version: impl Into<String>,
    ) -> Self {
        let mut columns = Vec::with_capacity(categorical_columns.len());

        for name in categorical_columns {
            let name = name.as_ref();
            let values = match records.column_values(name) {
                Ok(values) => values,
                Err(_) => {
                    log::warn!("Categorical column '{}' not present, skipping", name);
                    continue;
                }
            };

            let mut distinct: Vec<&Value> = values;
            distinct.sort_by(|a, b| a.total_cmp(b));
            // Values of different kinds can share a label ("1" and 1.0)
            let mut seen = HashSet::new();
            let mut categories: Vec<String> = Vec::new();
            for value in distinct {
                let label = value.label();
                if seen.insert(label.clone()) {
                    categories.push(label);
                }
            }

            columns.push(CategoricalColumn {
                name: name.to_string(),
                categories,
            });
        }

        Self::new(version, columns)
    }

    pub fn column(&self, name: &str) -> Option<&CategoricalColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sorts_and_dedupes() {
        let records = RecordSet::from_pairs(vec![
            vec![("region", Value::from("North")), ("band", Value::from(3.0))],
            vec![("region", Value::from("East")), ("band", Value::from(1.0))],
            vec![("region", Value::from("North")), ("band", Value::from(10.0))],
        ])
        .unwrap();

        let vocab = CategoryVocabulary::fit(&records, &["region", "band", "missing"], "v1");
        assert_eq!(vocab.version, "v1");
        assert_eq!(vocab.column_names(), vec!["region", "band"]);

        let region = vocab.column("region").unwrap();
        assert_eq!(region.categories, vec!["East", "North"]);
        assert_eq!(region.reference(), Some("East"));
        assert_eq!(region.indicator_names(), vec!["region_North"]);

        // numeric categories order numerically, not lexically
        let band = vocab.column("band").unwrap();
        assert_eq!(band.categories, vec!["1", "3", "10"]);
    }

    #[test]
    fn test_mixed_kinds_with_same_label_dedupe() {
        let records = RecordSet::from_pairs(vec![
            vec![("band", Value::from(1.0))],
            vec![("band", Value::from(2.0))],
            vec![("band", Value::from("1"))],
            vec![("band", Value::from(-0.0))],
            vec![("band", Value::from(0.0))],
        ])
        .unwrap();
        let vocab = CategoryVocabulary::fit(&records, &["band"], "v1");
        assert_eq!(vocab.column("band").unwrap().categories, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_single_category_has_no_indicators() {
        let column = CategoricalColumn {
            name: "occ".into(),
            categories: vec!["Employed".into()],
        };
        assert!(column.indicator_names().is_empty());

        let empty = CategoricalColumn { name: "occ".into(), categories: vec![] };
        assert!(empty.indicator_names().is_empty());
        assert_eq!(empty.reference(), None);
    }

    #[test]
    fn test_version_defaults_when_absent() {
        let vocab: CategoryVocabulary =
            serde_json::from_str(r#"{"columns": [{"name": "r", "categories": ["a", "b"]}]}"#)
                .unwrap();
        assert_eq!(vocab.version, INFERRED_VERSION);
        assert!(vocab.is_categorical("r"));
    }
}
