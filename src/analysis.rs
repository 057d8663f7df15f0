// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! End-to-end analysis pipeline.
//!
//! Ties the stages together in contract order: preprocess the scan, load the
//! model, run the forward pass, then derive the verdict. A bad image fails
//! before any model-load cost is paid.

use std::path::Path;

use crate::error::Result;
use crate::labels::ClassLabels;
use crate::model::ClassifierModel;
use crate::preprocessing::preprocess_file;
use crate::results::Prediction;
use crate::warn;

/// Analyze one scan with one model and derive the classification verdict.
///
/// Runs the full pipeline: preprocess `image_path` into the input tensor,
/// load the model at `model_path`, execute one forward pass, take the argmax
/// over the probability vector (ties resolve to the lowest index), and
/// resolve the label. Labels are passed in by the caller, so tests and
/// embedders can substitute their own list.
///
/// # Arguments
///
/// * `image_path` - Path to the input scan.
/// * `model_path` - Path to the ONNX model artifact.
/// * `labels` - Class labels used to resolve the predicted index.
///
/// # Errors
///
/// Returns the `ImageProcessing` variant for decode/resize failures, and the
/// matching `ModelLoad`/`Inference` variant for everything after the image
/// stage.
pub fn analyze<P: AsRef<Path>, Q: AsRef<Path>>(
    image_path: P,
    model_path: Q,
    labels: &ClassLabels,
) -> Result<Prediction> {
    // Image stage first: a bad scan must fail before the model is touched.
    let tensor = preprocess_file(image_path)?;

    let mut model = ClassifierModel::load(model_path)?;
    let probs = model.predict(&tensor)?;

    let class_index = probs.top1();
    let confidence = probs.top1_conf();

    if class_index >= labels.len() {
        warn!(
            "Predicted class {} is outside the {}-entry label list; model and labels may not match",
            class_index,
            labels.len()
        );
    }

    Ok(Prediction::new(
        labels.resolve(class_index),
        confidence,
        class_index,
    ))
}
