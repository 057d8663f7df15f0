// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Result types for classification output.
//!
//! [`Probs`] wraps the sanitized probability vector; [`Prediction`] and
//! [`FailureReport`] are the two verdict shapes the CLI serializes to
//! standard output.

use ndarray::Array1;
use serde::Serialize;

use crate::error::AnalysisError;

/// Classification probabilities.
///
/// Stores class probabilities with convenience methods for top predictions.
#[derive(Debug, Clone)]
pub struct Probs {
    /// Raw probability data with shape (`num_classes`,).
    pub data: Array1<f32>,
}

impl Probs {
    /// Create a new Probs instance.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw probability array.
    ///
    /// # Returns
    ///
    /// * A new `Probs` instance.
    #[must_use]
    pub const fn new(data: Array1<f32>) -> Self {
        Self { data }
    }

    /// Get the index of the top-1 class.
    ///
    /// Ties resolve to the lowest index (conventional argmax tie-break), and
    /// an empty vector resolves to 0.
    ///
    /// # Returns
    ///
    /// * The class index with the highest probability.
    #[must_use]
    pub fn top1(&self) -> usize {
        let mut best_idx = 0;
        let mut best_val = f32::NEG_INFINITY;
        for (i, &v) in self.data.iter().enumerate() {
            if v > best_val {
                best_idx = i;
                best_val = v;
            }
        }
        best_idx
    }

    /// Get the confidence of the top-1 class.
    ///
    /// # Returns
    ///
    /// * The probability of the top class, or 0.0 for an empty vector.
    #[must_use]
    pub fn top1_conf(&self) -> f32 {
        self.data.get(self.top1()).copied().unwrap_or(0.0)
    }

    /// Get the indices of the top-k classes.
    ///
    /// # Arguments
    ///
    /// * `k` - The number of classes to return.
    ///
    /// # Returns
    ///
    /// * A vector of the top k class indices sorted by probability.
    #[must_use]
    pub fn top_k(&self, k: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.data.len()).collect();
        indices.sort_by(|&a, &b| {
            self.data[b]
                .partial_cmp(&self.data[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices.truncate(k);
        indices
    }

    /// Get the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the probability vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Final classification verdict for one scan.
///
/// Serializes to the exact success shape callers consume:
/// `{"prediction": string, "confidence": number, "class_index": integer}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Human-readable class label.
    pub prediction: String,
    /// Probability of the predicted class, in [0, 1].
    pub confidence: f32,
    /// Index of the predicted class in the model output vector.
    pub class_index: usize,
}

impl Prediction {
    /// Create a new Prediction.
    ///
    /// # Arguments
    ///
    /// * `prediction` - Resolved class label.
    /// * `confidence` - Probability of the predicted class.
    /// * `class_index` - Argmax index in the output vector.
    ///
    /// # Returns
    ///
    /// * A new `Prediction` instance.
    #[must_use]
    pub const fn new(prediction: String, confidence: f32, class_index: usize) -> Self {
        Self {
            prediction,
            confidence,
            class_index,
        }
    }
}

/// Machine-readable failure verdict, `{"error": string}`.
///
/// The message prefix encodes the failure tier: image-stage failures report
/// as `Error processing image: ...`, everything else as `Analysis failed:
/// ...`. Library callers discriminate on [`AnalysisError`] variants instead
/// of parsing the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Failure message carrying its stage prefix.
    pub error: String,
}

impl From<&AnalysisError> for FailureReport {
    fn from(err: &AnalysisError) -> Self {
        let error = match err {
            AnalysisError::ImageProcessing(detail) => format!("Error processing image: {detail}"),
            other => format!("Analysis failed: {other}"),
        };
        Self { error }
    }
}
