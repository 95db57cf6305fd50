//! Core record types: cell values and ordered record sets

use crate::error::{RateError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single cell of a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Number(f64),
    Category(String),
}

impl Value {
    /// Parse a raw text cell: number first, then `true`/`false`, else category
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(number) = trimmed.parse::<f64>() {
            return Value::Number(number);
        }
        match trimmed {
            "true" | "True" | "TRUE" => Value::Flag(true),
            "false" | "False" | "FALSE" => Value::Flag(false),
            _ => Value::Category(trimmed.to_string()),
        }
    }

    /// Strict numeric view, only `Number` cells
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view where flags count as 1.0 / 0.0
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Category(_) => None,
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Value::Category(_))
    }

    /// Text label used for indicator column names and group keys
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Total order across all cell kinds: flags, then numbers, then categories.
    /// Signed zeros compare equal.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Flag(a), Value::Flag(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) if a == b => Ordering::Equal,
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Category(a), Value::Category(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Flag(_) => 0,
            Value::Number(_) => 1,
            Value::Category(_) => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Flag(b) => write!(f, "{}", b),
            Value::Number(n) if *n == 0.0 => f.write_str("0"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Category(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Category(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Category(s)
    }
}

/// Ordered rows sharing an ordered set of named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordSet {
    /// Empty record set with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Build from column names and row-major values; every row must match the column count
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut records = Self::new(columns);
        for row in rows {
            records.push_row(row)?;
        }
        Ok(records)
    }

    /// Build from rows of `(column, value)` pairs.
    /// Columns are ordered by first appearance; every row must supply every column.
    pub fn from_pairs<K, V, R, I>(rows: I) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Value>,
        R: IntoIterator<Item = (K, V)>,
        I: IntoIterator<Item = R>,
    {
        let keyed: Vec<Vec<(String, Value)>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            .collect();

        let mut columns: Vec<String> = Vec::new();
        for row in &keyed {
            for (name, _) in row {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let mut records = Self::new(columns);
        for row in keyed {
            let mut values = Vec::with_capacity(records.columns.len());
            for name in &records.columns {
                let value = row
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| RateError::ColumnNotFound(name.clone()))?;
                values.push(value);
            }
            records.rows.push(values);
        }
        Ok(records)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(RateError::SchemaMismatch(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of `name`, or `ColumnNotFound`
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| RateError::ColumnNotFound(name.to_string()))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// All cells of one column in row order
    pub fn column_values(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Column as floats (flags as 1.0/0.0); categories are rejected
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.require_column(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, r)| {
                r[idx].as_f64().ok_or_else(|| RateError::NonNumericValue {
                    column: name.to_string(),
                    row,
                })
            })
            .collect()
    }

    /// Rewrite every cell of one column in place
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &Value) -> Result<Value>,
    {
        let idx = self.require_column(name)?;
        for (row, values) in self.rows.iter_mut().enumerate() {
            values[idx] = f(row, &values[idx])?;
        }
        Ok(())
    }

    /// Replace the named column, or append it when absent
    pub fn upsert_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(RateError::SchemaMismatch(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Subset of rows by index, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }
}
