//! Linear regression artifact

use super::{check_schema, Predictor};
use crate::error::{RateError, Result};
use crate::features::EncodedMatrix;
use serde::{Deserialize, Serialize};

/// `intercept + Σ coefficient_i * feature_i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,

    #[serde(default)]
    pub intercept: f64,

    /// One coefficient per feature, same order as `feature_names`
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            ));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>> {
        check_schema(matrix, &self.feature_names)?;
        self.validate().map_err(RateError::SchemaMismatch)?;

        let mut predictions = vec![self.intercept; matrix.n_rows()];
        for (name, coefficient) in self.feature_names.iter().zip(&self.coefficients) {
            if let Some(values) = matrix.column(name) {
                for (p, x) in predictions.iter_mut().zip(values) {
                    *p += coefficient * x;
                }
            }
        }
        Ok(predictions)
    }

    fn expected_features(&self) -> &[String] {
        &self.feature_names
    }
}
