//! Gradient-boosted regression tree ensemble (inference only)
//!
//! Trees are stored as flat node arrays. A split node sends a row left when
//! its feature value is `<= threshold`. The prediction for a row is the base
//! score plus the leaf value reached in every tree.

use super::{check_schema, Predictor};
use crate::error::{RateError, Result};
use crate::features::EncodedMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        /// Index into the ensemble's feature names
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walk from the root to a leaf for one row of features
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Children must point forward inside the tree, which rules out cycles
    fn validate(&self, tree: usize, n_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {} has no nodes", tree));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, left, right, .. } = node {
                if *feature >= n_features {
                    return Err(format!(
                        "tree {} node {} splits on feature {} of {}",
                        tree, idx, feature, n_features
                    ));
                }
                for child in [*left, *right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!(
                            "tree {} node {} has invalid child {}",
                            tree, idx, child
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Fitted boosting ensemble with its feature schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// Ordered feature names expected at inference time
    pub feature_names: Vec<String>,

    #[serde(default)]
    pub base_score: f64,

    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        let n_features = self.feature_names.len();
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, n_features))
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.evaluate(row)).sum::<f64>()
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, matrix: &EncodedMatrix) -> Result<Vec<f64>> {
        check_schema(matrix, &self.feature_names)?;
        self.validate().map_err(RateError::SchemaMismatch)?;

        let predictions: Vec<f64> = (0..matrix.n_rows())
            .into_par_iter()
            .map(|r| self.predict_row(&matrix.row(r)))
            .collect();
        Ok(predictions)
    }

    fn expected_features(&self) -> &[String] {
        &self.feature_names
    }
}
