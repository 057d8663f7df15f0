// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Post-processing for classification model outputs.
//!
//! This module sanitizes the raw output row before the verdict is derived:
//! non-finite filtering and a softmax fallback for models exported with a
//! logits head instead of a softmax head.

use ndarray::Array1;

use crate::results::Probs;

/// Tolerated deviation from 1.0 before a row is treated as unnormalized logits.
const SUM_TOLERANCE: f32 = 0.1;

/// Convert a raw model output row into class probabilities.
///
/// NaN and infinite values are mapped to 0.0. If the row does not already sum
/// to ~1, a numerically stable softmax (max-subtraction) is applied, keeping
/// every confidence inside [0, 1] regardless of how the model head was
/// exported.
///
/// # Arguments
///
/// * `output` - Flattened model output row.
///
/// # Returns
///
/// * Class probabilities wrapped in [`Probs`].
#[must_use]
pub fn probabilities(output: &[f32]) -> Probs {
    if output.is_empty() {
        return Probs::new(Array1::from_vec(Vec::new()));
    }

    // Filter out non-finite values; an inf logit would poison the softmax
    // (inf - inf is NaN) and survive into the confidence.
    let mut probs_vec: Vec<f32> = output
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .collect();

    // Check if softmax is already applied (sum ≈ 1.0)
    let sum: f32 = probs_vec.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        let max_val = probs_vec.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp_vals: Vec<f32> = probs_vec.iter().map(|&v| (v - max_val).exp()).collect();
        let exp_sum: f32 = exp_vals.iter().sum();
        if exp_sum > 0.0 {
            probs_vec = exp_vals.iter().map(|&v| v / exp_sum).collect();
        }
    }

    Probs::new(Array1::from_vec(probs_vec))
}
