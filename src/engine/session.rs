//! Interactive what-if session
//!
//! A session owns the base record set, the loaded model and the categorical
//! vocabulary. Every rate change is applied to a copy of the base data and
//! rescored; a failed change leaves the previous scenario in place.

use super::recompute::recompute_with;
use super::EXPECTED_COLUMN;
use crate::error::Result;
use crate::features::CategoryVocabulary;
use crate::model::{ModelArtifact, Predictor};
use crate::records::{Adjustment, RecordSet};
use crate::report::{holdout_mse, loss_ratio, summarize, AggregationResult, HoldoutSplit};

/// Pick the vocabulary stored with the model, or fit one from the base data
pub fn resolve_vocabulary<S: AsRef<str>>(
    artifact: &ModelArtifact,
    records: &RecordSet,
    categorical_columns: &[S],
) -> CategoryVocabulary {
    match &artifact.vocabulary {
        Some(vocabulary) => vocabulary.clone(),
        None => {
            log::warn!("Model carries no vocabulary; fitting categories from base data");
            CategoryVocabulary::fit(records, categorical_columns, "base-data")
        }
    }
}

pub struct Session<P> {
    base: RecordSet,
    baseline: RecordSet,
    current: RecordSet,
    adjustment: Option<Adjustment>,
    model: P,
    vocabulary: CategoryVocabulary,
    actual_column: String,
}

impl<P: Predictor> Session<P> {
    /// Score the base data once and start with the baseline as the current scenario
    pub fn new(
        base: RecordSet,
        model: P,
        vocabulary: CategoryVocabulary,
        actual_column: impl Into<String>,
    ) -> Result<Self> {
        let actual_column = actual_column.into();
        base.require_column(&actual_column)?;

        let baseline = recompute_with(&base, &model, &vocabulary)?;
        log::info!(
            "Session started: {} records, {} model features, vocabulary {}",
            base.len(),
            model.expected_features().len(),
            vocabulary.version
        );

        Ok(Self {
            current: baseline.clone(),
            baseline,
            base,
            adjustment: None,
            model,
            vocabulary,
            actual_column,
        })
    }

    /// Apply `adjustment` to the base data and make the rescored result current
    pub fn apply(&mut self, adjustment: &Adjustment) -> Result<&RecordSet> {
        let scored = adjustment
            .apply(&self.base)
            .and_then(|scenario| recompute_with(&scenario, &self.model, &self.vocabulary));

        match scored {
            Ok(scored) => {
                log::info!("Applied scenario {}", adjustment);
                self.current = scored;
                self.adjustment = if adjustment.is_identity() {
                    None
                } else {
                    Some(adjustment.clone())
                };
                Ok(&self.current)
            }
            Err(err) => {
                if err.is_recoverable() {
                    log::warn!("Rejected scenario {}: {}", adjustment, err);
                } else {
                    log::error!("Scenario {} aborted: {}", adjustment, err);
                }
                Err(err)
            }
        }
    }

    /// Drop the current scenario and return to the baseline
    pub fn reset(&mut self) {
        self.current = self.baseline.clone();
        self.adjustment = None;
    }

    /// Unscored input data
    pub fn base(&self) -> &RecordSet {
        &self.base
    }

    /// Base data with baseline expected values
    pub fn baseline(&self) -> &RecordSet {
        &self.baseline
    }

    pub fn current(&self) -> &RecordSet {
        &self.current
    }

    /// Adjustment behind the current scenario, `None` at baseline
    pub fn adjustment(&self) -> Option<&Adjustment> {
        self.adjustment.as_ref()
    }

    pub fn model(&self) -> &P {
        &self.model
    }

    pub fn vocabulary(&self) -> &CategoryVocabulary {
        &self.vocabulary
    }

    pub fn actual_column(&self) -> &str {
        &self.actual_column
    }

    pub fn summary(&self, group_column: &str) -> Result<AggregationResult> {
        summarize(&self.current, group_column, &self.actual_column, EXPECTED_COLUMN)
    }

    pub fn baseline_summary(&self, group_column: &str) -> Result<AggregationResult> {
        summarize(&self.baseline, group_column, &self.actual_column, EXPECTED_COLUMN)
    }

    pub fn loss_ratio(&self) -> Result<f64> {
        loss_ratio(&self.current, &self.actual_column, EXPECTED_COLUMN)
    }

    /// Split sized for this session's data
    pub fn holdout_split(&self, test_fraction: f64, seed: u64) -> HoldoutSplit {
        HoldoutSplit::new(self.base.len(), test_fraction, seed)
    }

    pub fn holdout_mse(&self, split: &HoldoutSplit) -> Result<f64> {
        holdout_mse(&self.current, split, &self.actual_column, EXPECTED_COLUMN)
    }

    /// Price individual quotes with the session's model and vocabulary.
    ///
    /// Quotes need no actual column; model features they lack count as zero.
    pub fn quote(&self, quotes: &RecordSet) -> Result<Vec<f64>> {
        let scored = recompute_with(quotes, &self.model, &self.vocabulary)?;
        scored.numeric_column(EXPECTED_COLUMN)
    }
}
