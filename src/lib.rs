// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

#![allow(clippy::multiple_crate_versions)]

//! # NeuroScan Inference
//!
//! One-shot brain MRI tumor classification on ONNX Runtime. The crate runs a
//! single forward pass over a preprocessed scan and reports the top class,
//! behind both a library API and a thin CLI that emits exactly one
//! machine-readable JSON verdict on stdout.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use neuroscan_inference::{ClassLabels, analyze};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Sidecar class_labels.json if present, built-in labels otherwise
//!     let labels = ClassLabels::load()?;
//!
//!     let verdict = analyze("scan.jpg", "brain_tumor.onnx", &labels)?;
//!     println!(
//!         "{} ({:.1}%, class {})",
//!         verdict.prediction,
//!         verdict.confidence * 100.0,
//!         verdict.class_index
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! neuroscan-inference --image scan.jpg --model brain_tumor.onnx
//! ```
//!
//! Stdout carries exactly one line of JSON on every code path; diagnostics go
//! to stderr. Callers treat stdout as machine-readable and stderr as log
//! noise:
//!
//! ```json
//! {"prediction":"Glioma Tumor","confidence":0.97,"class_index":1}
//! ```
//!
//! | Exit code | Stdout shape |
//! |-----------|--------------|
//! | `0` | `{"prediction": string, "confidence": number, "class_index": integer}` |
//! | `1` (image stage) | `{"error": "Error processing image: <detail>"}` |
//! | `1` (anything else) | `{"error": "Analysis failed: <detail>"}` |
//!
//! ## Class Labels
//!
//! A `class_labels.json` file in the working directory (a JSON array of
//! strings, ordered by model output index) overrides the built-in label set
//! (`No Tumor`, `Glioma Tumor`, `Meningioma Tumor`, `Pituitary Tumor`). A
//! missing file is not an error; a malformed one is. A predicted index with
//! no label resolves to `"Class N"`.
//!
//! ## Pipeline
//!
//! The scan is decoded, stretch-resized to 224x224 with bilinear resampling,
//! scaled into [0, 1], and shaped as a (1, 224, 224, 3) NHWC tensor. The
//! model output row is NaN-filtered and softmax-normalized when it does not
//! already sum to ~1, so the reported confidence stays a probability even
//! for logits-head exports. Everything is loaded fresh per invocation; no
//! state survives the process.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analysis`] | End-to-end pipeline ([`analyze`]) |
//! | [`model`] | [`ClassifierModel`] ONNX session wrapper |
//! | [`labels`] | [`ClassLabels`] sidecar loading and resolution |
//! | [`preprocessing`] | Decode, resize, and tensor conversion |
//! | [`postprocessing`] | Output sanitization ([`Probs`] construction) |
//! | [`results`] | Verdict types ([`Prediction`], [`FailureReport`]) |
//! | [`error`] | Error types ([`AnalysisError`], [`Result`]) |
//! | [`cli`] | Argument parsing and stderr logging macros |
//!
//! ## License
//!
//! AGPL-3.0.

// Modules
pub mod analysis;
pub mod cli;
pub mod error;
pub mod labels;
pub mod model;
pub mod postprocessing;
pub mod preprocessing;
pub mod results;

// Re-export main types for convenience
pub use analysis::analyze;
pub use error::{AnalysisError, Result};
pub use labels::ClassLabels;
pub use model::ClassifierModel;
pub use results::{FailureReport, Prediction, Probs};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
