//! Model interface and serialized model artifacts

pub mod ensemble;
pub mod linear;
pub mod loader;

pub use ensemble::{RegressionTree, TreeEnsemble, TreeNode};
pub use linear::LinearModel;
pub use loader::{ModelSource, ModelStore};

use crate::error::{RateError, Result};
use crate::features::{CategoryVocabulary, EncodedMatrix};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A fitted regressor: predicts from aligned features and knows its schema
pub trait Predictor {
    /// One prediction per matrix row, in row order
    fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>>;

    /// Ordered feature names the model expects at inference time
    fn expected_features(&self) -> &[String];
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>> {
        (**self).predict(matrix)
    }

    fn expected_features(&self) -> &[String] {
        (**self).expected_features()
    }
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>> {
        (**self).predict(matrix)
    }

    fn expected_features(&self) -> &[String] {
        (**self).expected_features()
    }
}

/// Matrix columns must equal the schema exactly, in order
pub(crate) fn check_schema(matrix: &EncodedMatrix, expected: &[String]) -> Result<()> {
    if matrix.names() != expected {
        return Err(RateError::SchemaMismatch(format!(
            "model expects {} features {:?}, got {:?}",
            expected.len(),
            expected,
            matrix.names()
        )));
    }
    Ok(())
}

/// Supported model families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    GradientBoosting(TreeEnsemble),
    Linear(LinearModel),
}

/// A model plus the categorical vocabulary it was fitted with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub vocabulary: Option<CategoryVocabulary>,

    pub model: ModelKind,
}

impl ModelArtifact {
    pub fn new(model: ModelKind) -> Self {
        Self { vocabulary: None, model }
    }

    pub fn with_vocabulary(mut self, vocabulary: CategoryVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Decode and validate a JSON artifact
    pub fn from_json_slice(bytes: &[u8], source_name: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)
            .map_err(|e| RateError::model_load(source_name, e))?;
        artifact
            .validate()
            .map_err(|reason| RateError::model_load(source_name, reason))?;
        Ok(artifact)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        match &self.model {
            ModelKind::GradientBoosting(ensemble) => ensemble.validate(),
            ModelKind::Linear(linear) => linear.validate(),
        }
    }

    fn predictor(&self) -> &dyn Predictor {
        match &self.model {
            ModelKind::GradientBoosting(ensemble) => ensemble,
            ModelKind::Linear(linear) => linear,
        }
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>> {
        self.predictor().predict(matrix)
    }

    fn expected_features(&self) -> &[String] {
        self.predictor().expected_features()
    }
}
