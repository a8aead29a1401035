//! Set-algebra comparison and precision/recall/F1.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;
use thiserror::Error;

/// Why precision/recall/F1 could not be computed for a category.
///
/// Callers catch this per category so one empty category does not abort
/// reporting for the others.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    #[error("empty predicted set: precision is undefined")]
    EmptyPredicted,

    #[error("empty truth set: recall is undefined")]
    EmptyTruth,

    #[error("precision and recall are both zero: f1 is undefined")]
    ZeroPrecisionRecall,
}

/// Raw set-overlap counts between a predicted and a truth set.
///
/// Always computable; the derived ratios live in [`Metrics`] so an empty
/// category fails metric computation without losing its counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub correct: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

/// Derived ratios for one category comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Compare two relation sets:
/// correct = |predicted ∩ truth|, false_positive = |predicted − truth|,
/// false_negative = |truth − predicted|.
pub fn compare<T: Eq + Hash>(predicted: &HashSet<T>, truth: &HashSet<T>) -> Comparison {
    Comparison {
        correct: predicted.intersection(truth).count(),
        false_positive: predicted.difference(truth).count(),
        false_negative: truth.difference(predicted).count(),
    }
}

impl Comparison {
    /// |predicted|, recovered from the counts.
    pub fn predicted_len(&self) -> usize {
        self.correct + self.false_positive
    }

    /// |truth|, recovered from the counts.
    pub fn truth_len(&self) -> usize {
        self.correct + self.false_negative
    }

    /// Precision, recall and F1, or the reason they are undefined.
    pub fn metrics(&self) -> Result<Metrics, MetricError> {
        if self.predicted_len() == 0 {
            return Err(MetricError::EmptyPredicted);
        }
        if self.truth_len() == 0 {
            return Err(MetricError::EmptyTruth);
        }
        let precision = self.correct as f64 / self.predicted_len() as f64;
        let recall = self.correct as f64 / self.truth_len() as f64;
        if precision + recall == 0.0 {
            return Err(MetricError::ZeroPrecisionRecall);
        }
        Ok(Metrics {
            precision,
            recall,
            f1: 2.0 * precision * recall / (precision + recall),
        })
    }
}
