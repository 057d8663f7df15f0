// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Error types for the analysis library.

use std::fmt;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Main error type for the analysis library.
///
/// The `ImageProcessing` variant marks failures in the decode/resize/normalize
/// stage, which the CLI reports with its own terminal message shape; every
/// other variant is reported through the general "Analysis failed" shape.
#[derive(Debug)]
pub enum AnalysisError {
    /// Error decoding, resizing, or normalizing the input image.
    ImageProcessing(String),
    /// Error loading the ONNX model.
    ModelLoad(String),
    /// Error during the forward pass.
    Inference(String),
    /// Error reading or parsing the class label sidecar file.
    LabelFile(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageProcessing(msg) => write!(f, "Image processing error: {msg}"),
            Self::ModelLoad(msg) => write!(f, "Model load error: {msg}"),
            Self::Inference(msg) => write!(f, "Inference error: {msg}"),
            Self::LabelFile(msg) => write!(f, "Label file error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageProcessing(err.to_string())
    }
}
