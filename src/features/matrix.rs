//! Named numeric feature matrix

use crate::error::{RateError, Result};

/// Column-major numeric matrix with named columns of equal length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl EncodedMatrix {
    /// Empty matrix with a fixed row count
    pub fn with_rows(n_rows: usize) -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
            n_rows,
        }
    }

    /// Assemble from columns already known to have `n_rows` values each
    pub(crate) fn from_columns(n_rows: usize, columns: Vec<(String, Vec<f64>)>) -> Self {
        debug_assert!(columns.iter().all(|(_, c)| c.len() == n_rows));
        let (names, columns) = columns.into_iter().unzip();
        Self { names, columns, n_rows }
    }

    /// Append a column; its length must match the row count
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.n_rows {
            return Err(RateError::SchemaMismatch(format!(
                "feature '{}' has {} values for {} rows",
                name,
                values.len(),
                self.n_rows
            )));
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Move a column out, leaving the matrix otherwise unchanged
    pub(crate) fn take_column(&mut self, name: &str) -> Option<Vec<f64>> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.names.remove(idx);
        Some(self.columns.remove(idx))
    }

    /// Values of one row in column order
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[row]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let mut matrix = EncodedMatrix::with_rows(2);
        matrix.push_column("a", vec![1.0, 2.0]).unwrap();
        matrix.push_column("b", vec![3.0, 4.0]).unwrap();

        assert_eq!(matrix.n_cols(), 2);
        assert_eq!(matrix.row(1), vec![2.0, 4.0]);
        assert_eq!(matrix.column("b"), Some(&[3.0, 4.0][..]));
        assert!(matrix.push_column("c", vec![1.0]).is_err());
    }
}
