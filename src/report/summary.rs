//! Actual-vs-expected summaries grouped by one dimension

use crate::error::Result;
use crate::records::{RecordSet, Value};
use serde::Serialize;

/// Means and count for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: Value,
    pub mean_actual: f64,
    pub mean_expected: f64,
    pub count: usize,
}

/// Groups ordered ascending by key
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregationResult {
    pub group_column: String,
    pub groups: Vec<GroupSummary>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| &g.key == key)
    }

    /// Total rows across all groups
    pub fn total_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

#[derive(Default)]
struct Accumulator {
    sum_actual: f64,
    sum_expected: f64,
    count: usize,
}

/// Group rows by `group_column` and average actual and expected values.
///
/// Empty record sets produce an empty result rather than an error.
pub fn summarize(
    records: &RecordSet,
    group_column: &str,
    actual_column: &str,
    expected_column: &str,
) -> Result<AggregationResult> {
    if records.is_empty() {
        return Ok(AggregationResult {
            group_column: group_column.to_string(),
            groups: Vec::new(),
        });
    }

    let keys = records.column_values(group_column)?;
    let actual = records.numeric_column(actual_column)?;
    let expected = records.numeric_column(expected_column)?;

    let mut groups: Vec<(Value, Accumulator)> = Vec::new();
    for ((key, a), e) in keys.into_iter().zip(actual).zip(expected) {
        let idx = match groups.binary_search_by(|(k, _)| k.total_cmp(key)) {
            Ok(idx) => idx,
            Err(idx) => {
                groups.insert(idx, (key.clone(), Accumulator::default()));
                idx
            }
        };
        let acc = &mut groups[idx].1;
        acc.sum_actual += a;
        acc.sum_expected += e;
        acc.count += 1;
    }

    let groups = groups
        .into_iter()
        .map(|(key, acc)| GroupSummary {
            key,
            mean_actual: acc.sum_actual / acc.count as f64,
            mean_expected: acc.sum_expected / acc.count as f64,
            count: acc.count,
        })
        .collect();

    Ok(AggregationResult {
        group_column: group_column.to_string(),
        groups,
    })
}

/// Render as a fixed-width text table
pub fn format_table(result: &AggregationResult) -> String {
    let mut out = format!(
        "{:<20} {:>14} {:>14} {:>8}\n",
        result.group_column, "Actual", "Expected", "Count"
    );
    if result.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }
    for group in &result.groups {
        out.push_str(&format!(
            "{:<20} {:>14.2} {:>14.2} {:>8}\n",
            group.key.label(),
            group.mean_actual,
            group.mean_expected,
            group.count
        ));
    }
    out
}
