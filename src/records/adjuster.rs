//! Apply rate adjustments to a record set
//!
//! An adjustment changes one numeric column (additively or by a percentage)
//! and always returns a new record set, leaving the base data untouched so
//! the same session can explore many what-if scenarios.

use super::{RecordSet, Value};
use crate::error::{RateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the magnitude is applied to each cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// new = old + magnitude
    Additive,
    /// new = old * (1 + magnitude / 100)
    Multiplicative,
}

impl AdjustmentKind {
    fn apply(self, old: f64, magnitude: f64) -> f64 {
        let new = match self {
            AdjustmentKind::Additive => old + magnitude,
            AdjustmentKind::Multiplicative => old * (1.0 + magnitude / 100.0),
        };
        // -100% of a negative value is -0.0; keep zero unsigned
        if new == 0.0 {
            0.0
        } else {
            new
        }
    }
}

impl FromStr for AdjustmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "additive" | "add" => Ok(AdjustmentKind::Additive),
            "multiplicative" | "mult" | "percent" => Ok(AdjustmentKind::Multiplicative),
            other => Err(format!(
                "unknown adjustment kind '{}' (expected additive or multiplicative)",
                other
            )),
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentKind::Additive => f.write_str("additive"),
            AdjustmentKind::Multiplicative => f.write_str("multiplicative"),
        }
    }
}

/// A single rate change on one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Column to change
    pub column: String,

    pub kind: AdjustmentKind,

    /// Amount added, or percentage applied for multiplicative changes.
    /// Unbounded: negative results are allowed.
    #[serde(default)]
    pub magnitude: f64,
}

impl Adjustment {
    pub fn new(column: impl Into<String>, kind: AdjustmentKind, magnitude: f64) -> Self {
        Self {
            column: column.into(),
            kind,
            magnitude,
        }
    }

    /// Zero magnitude leaves every value unchanged for both kinds
    pub fn is_identity(&self) -> bool {
        self.magnitude == 0.0
    }

    /// Produce the scenario record set for this adjustment
    pub fn apply(&self, records: &RecordSet) -> Result<RecordSet> {
        apply_adjustment(records, &self.column, self.kind, self.magnitude)
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AdjustmentKind::Additive => write!(f, "{} {:+}", self.column, self.magnitude),
            AdjustmentKind::Multiplicative => write!(f, "{} {:+}%", self.column, self.magnitude),
        }
    }
}

/// Copy `records` and change `column` by `magnitude`
pub fn apply_adjustment(
    records: &RecordSet,
    column: &str,
    kind: AdjustmentKind,
    magnitude: f64,
) -> Result<RecordSet> {
    records.require_column(column)?;

    let mut adjusted = records.clone();
    if magnitude == 0.0 {
        return Ok(adjusted);
    }

    adjusted.map_column(column, |row, value| match value.as_number() {
        Some(old) => Ok(Value::Number(kind.apply(old, magnitude))),
        None => Err(RateError::NonNumericValue {
            column: column.to_string(),
            row,
        }),
    })?;

    log::debug!(
        "Applied {} adjustment of {} to '{}' across {} rows",
        kind,
        magnitude,
        column,
        adjusted.len()
    );
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn records() -> RecordSet {
        RecordSet::from_pairs(vec![
            vec![("X", Value::from(10.0)), ("cat", Value::from("A"))],
            vec![("X", Value::from(20.0)), ("cat", Value::from("B"))],
        ])
        .expect("valid rows")
    }

    #[test]
    fn test_additive() {
        let adjusted = apply_adjustment(&records(), "X", AdjustmentKind::Additive, 5.0).unwrap();
        assert_eq!(adjusted.numeric_column("X").unwrap(), vec![15.0, 25.0]);
        assert_eq!(adjusted.value(0, "cat"), Some(&Value::from("A")));
        assert_eq!(adjusted.value(1, "cat"), Some(&Value::from("B")));
    }

    #[test]
    fn test_multiplicative() {
        let adjusted =
            apply_adjustment(&records(), "X", AdjustmentKind::Multiplicative, 10.0).unwrap();
        let x = adjusted.numeric_column("X").unwrap();
        assert_relative_eq!(x[0], 11.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 22.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_magnitude_is_identity() {
        let base = records();
        for kind in [AdjustmentKind::Additive, AdjustmentKind::Multiplicative] {
            let adjusted = apply_adjustment(&base, "X", kind, 0.0).unwrap();
            assert_eq!(adjusted.numeric_column("X").unwrap(), vec![10.0, 20.0]);
            assert_eq!(adjusted, base);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let base = records();
        let _ = apply_adjustment(&base, "X", AdjustmentKind::Additive, 100.0).unwrap();
        let _ = apply_adjustment(&base, "X", AdjustmentKind::Multiplicative, -50.0).unwrap();
        assert_eq!(base.numeric_column("X").unwrap(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_negative_results_permitted() {
        let adjusted =
            apply_adjustment(&records(), "X", AdjustmentKind::Multiplicative, -250.0).unwrap();
        assert_eq!(adjusted.numeric_column("X").unwrap(), vec![-15.0, -30.0]);
    }

    #[test]
    fn test_removing_factor_gives_one_zero_group() {
        let records = RecordSet::from_pairs(vec![
            vec![("x", Value::from(0.0)), ("actual", Value::from(4.0)), ("Expected", Value::from(2.0))],
            vec![("x", Value::from(-5.0)), ("actual", Value::from(6.0)), ("Expected", Value::from(8.0))],
        ])
        .unwrap();
        let adjusted =
            apply_adjustment(&records, "x", AdjustmentKind::Multiplicative, -100.0).unwrap();
        for x in adjusted.numeric_column("x").unwrap() {
            assert!(x == 0.0 && x.is_sign_positive());
        }

        let summary = crate::report::summarize(&adjusted, "x", "actual", "Expected").unwrap();
        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].key, Value::from(0.0));
        assert_eq!(summary.groups[0].count, 2);
        assert_relative_eq!(summary.groups[0].mean_actual, 5.0);
    }

    #[test]
    fn test_unknown_column() {
        let result = apply_adjustment(&records(), "Premium", AdjustmentKind::Additive, 1.0);
        assert!(matches!(result, Err(RateError::ColumnNotFound(c)) if c == "Premium"));
    }

    #[test]
    fn test_non_numeric_column() {
        let result = apply_adjustment(&records(), "cat", AdjustmentKind::Additive, 1.0);
        assert!(matches!(result, Err(RateError::NonNumericValue { row: 0, .. })));
    }

    #[test]
    fn test_kind_parsing_and_serde() {
        assert_eq!("Additive".parse::<AdjustmentKind>(), Ok(AdjustmentKind::Additive));
        assert_eq!("mult".parse::<AdjustmentKind>(), Ok(AdjustmentKind::Multiplicative));
        assert!("scale".parse::<AdjustmentKind>().is_err());

        let adj: Adjustment = serde_json::from_str(
            r#"{"column": "X", "kind": "multiplicative", "magnitude": 10.0}"#,
        )
        .unwrap();
        assert_eq!(adj, Adjustment::new("X", AdjustmentKind::Multiplicative, 10.0));
        assert_eq!(adj.to_string(), "X +10%");
    }
}
