// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Model loading and inference.
//!
//! This module provides the [`ClassifierModel`] struct for loading an ONNX
//! classification model and running the single forward pass.

use std::path::Path;

use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;

use crate::error::{AnalysisError, Result};
use crate::postprocessing::probabilities;
use crate::results::Probs;

/// Fallback input tensor name when the model metadata does not provide one.
const DEFAULT_INPUT_NAME: &str = "input";

/// Loaded classification model.
///
/// Wraps an ONNX Runtime session together with the input and output names
/// resolved from its metadata. The handle is exclusively owned and loaded
/// fresh for every invocation; nothing is cached across runs.
///
/// # Example
///
/// ```no_run
/// use neuroscan_inference::{ClassifierModel, preprocessing};
///
/// let tensor = preprocessing::preprocess_file("scan.jpg")?;
/// let mut model = ClassifierModel::load("brain_tumor.onnx")?;
/// let probs = model.predict(&tensor)?;
/// println!("top class: {}", probs.top1());
/// # Ok::<(), neuroscan_inference::AnalysisError>(())
/// ```
pub struct ClassifierModel {
    /// ONNX Runtime session.
    session: Session,
    /// Input tensor name.
    input_name: String,
    /// Output tensor names.
    output_names: Vec<String>,
}

impl ClassifierModel {
    /// Load a classification model from an ONNX file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ONNX model file.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist or can't be loaded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Check if file exists
        if !path.exists() {
            return Err(AnalysisError::ModelLoad(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| {
                AnalysisError::ModelLoad(format!("Failed to create session builder: {e}"))
            })?
            // Level3 enables all graph optimizations including extended ones
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(|e| {
                AnalysisError::ModelLoad(format!("Failed to set optimization level: {e}"))
            })?
            .commit_from_file(path)
            .map_err(|e| AnalysisError::ModelLoad(format!("Failed to load model: {e}")))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string());

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        Ok(Self {
            session,
            input_name,
            output_names,
        })
    }

    /// Run one forward pass and return the class probabilities.
    ///
    /// The raw output row is sanitized (NaN filtering, softmax fallback for
    /// logits-head exports) before being returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Preprocessed tensor of shape (1, 224, 224, 3).
    ///
    /// # Errors
    ///
    /// Returns an error if the forward pass fails or the model produces no
    /// usable output.
    pub fn predict(&mut self, input: &Array4<f32>) -> Result<Probs> {
        let (data, _shape) = self.run_inference(input)?;

        if data.is_empty() {
            return Err(AnalysisError::Inference(
                "Model produced an empty output tensor".to_string(),
            ));
        }

        Ok(probabilities(&data))
    }

    /// Run the ONNX model inference.
    fn run_inference(&mut self, input: &Array4<f32>) -> Result<(Vec<f32>, Vec<usize>)> {
        // Ensure input is contiguous in memory (CowArray)
        let input_contiguous = input.as_standard_layout();

        let input_tensor = TensorRef::from_array_view(&input_contiguous)
            .map_err(|e| AnalysisError::Inference(format!("Failed to create input tensor: {e}")))?;

        // inputs! macro returns a Vec, not a Result
        let inputs = ort::inputs![&self.input_name => input_tensor];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| AnalysisError::Inference(format!("Inference failed: {e}")))?;

        let output_name = self
            .output_names
            .first()
            .ok_or_else(|| AnalysisError::Inference("Model defines no output tensors".to_string()))?;

        let output = outputs
            .get(output_name.as_str())
            .ok_or_else(|| AnalysisError::Inference(format!("Output '{output_name}' not found")))?;

        // Get output as f32 tensor - try_extract_tensor returns (shape, data)
        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| AnalysisError::Inference(format!("Failed to extract output: {e}")))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shape_vec: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        let data_vec: Vec<f32> = data.to_vec();

        Ok((data_vec, shape_vec))
    }

    /// Get the resolved input tensor name.
    #[must_use]
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Get the resolved output tensor names.
    #[must_use]
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

impl std::fmt::Debug for ClassifierModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierModel")
            .field("input_name", &self.input_name)
            .field("output_names", &self.output_names)
            .finish_non_exhaustive()
    }
}
