// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Integration tests for the NeuroScan inference library.
//!
//! These run the public pipeline without a real ONNX model: every scenario
//! either fails before the runtime is touched or exercises the pure stages
//! (labels, preprocessing, postprocessing, verdict serialization) directly.
//! The binary-level tests at the end spawn the compiled executable to pin
//! the exit codes and the one-JSON-line stdout contract.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use neuroscan_inference::labels::DEFAULT_LABELS;
use neuroscan_inference::postprocessing::probabilities;
use neuroscan_inference::preprocessing;
use neuroscan_inference::{AnalysisError, ClassLabels, FailureReport, Prediction, analyze};

fn save_test_image(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("scan.png");
    let img = image::RgbImage::from_pixel(64, 48, image::Rgb([200, 30, 90]));
    img.save(&path).unwrap();
    path
}

#[test]
fn test_image_failure_short_circuits_before_model() {
    let labels = ClassLabels::defaults();

    // Both paths are invalid; the image stage must fail first.
    let err = analyze("no_such_scan.jpg", "no_such_model.onnx", &labels).unwrap_err();
    assert!(matches!(err, AnalysisError::ImageProcessing(_)));
}

#[test]
fn test_missing_model_is_analysis_failure() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = save_test_image(dir.path());
    let labels = ClassLabels::defaults();

    let err = analyze(&image_path, "no_such_model.onnx", &labels).unwrap_err();
    assert!(matches!(err, AnalysisError::ModelLoad(_)));

    let report = FailureReport::from(&err);
    assert!(report.error.starts_with("Analysis failed: "));
    assert!(report.error.contains("no_such_model.onnx"));
}

#[test]
fn test_image_failure_report_shape() {
    let labels = ClassLabels::defaults();

    let err = analyze("no_such_scan.jpg", "no_such_model.onnx", &labels).unwrap_err();
    let report = FailureReport::from(&err);

    assert!(report.error.starts_with("Error processing image: "));
    // The detail after the prefix must be nonempty.
    assert!(report.error.len() > "Error processing image: ".len());
    assert!(!report.error.starts_with("Analysis failed"));
}

#[test]
fn test_corrupt_image_is_image_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.jpg");
    fs::write(&path, b"definitely not a jpeg").unwrap();

    let labels = ClassLabels::defaults();
    let err = analyze(&path, "no_such_model.onnx", &labels).unwrap_err();
    assert!(matches!(err, AnalysisError::ImageProcessing(_)));
}

#[test]
fn test_glioma_scenario_end_to_end() {
    // A model output of [0.1, 0.7, 0.1, 0.1] with default labels yields the
    // canonical glioma verdict.
    let probs = probabilities(&[0.1, 0.7, 0.1, 0.1]);
    let class_index = probs.top1();
    let confidence = probs.top1_conf();

    let labels = ClassLabels::defaults();
    let verdict = Prediction::new(labels.resolve(class_index), confidence, class_index);

    let json = serde_json::to_string(&verdict).unwrap();
    assert_eq!(
        json,
        r#"{"prediction":"Glioma Tumor","confidence":0.7,"class_index":1}"#
    );
}

#[test]
fn test_sidecar_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class_labels.json");
    fs::write(&path, r#"["Healthy", "Glioma", "Meningioma", "Pituitary"]"#).unwrap();

    let labels = ClassLabels::load_from(&path).unwrap();
    assert_eq!(labels.resolve(0), "Healthy");
    assert_eq!(labels.resolve(3), "Pituitary");
    assert_eq!(labels.resolve(9), "Class 9");
}

#[test]
fn test_missing_sidecar_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let labels = ClassLabels::load_from(dir.path().join("class_labels.json")).unwrap();

    assert_eq!(labels.len(), DEFAULT_LABELS.len());
    for (i, name) in DEFAULT_LABELS.iter().enumerate() {
        assert_eq!(labels.resolve(i), *name);
    }
}

#[test]
fn test_malformed_sidecar_is_analysis_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class_labels.json");
    fs::write(&path, "not json at all").unwrap();

    let err = ClassLabels::load_from(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::LabelFile(_)));

    let report = FailureReport::from(&err);
    assert!(report.error.starts_with("Analysis failed: Label file error:"));
}

#[test]
fn test_preprocess_shape_and_range() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = save_test_image(dir.path());

    let tensor = preprocessing::preprocess_file(&image_path).unwrap();
    assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));

    // The source image is uniform, so resizing preserves every channel value.
    let expected = [200.0 / 255.0, 30.0 / 255.0, 90.0 / 255.0];
    for c in 0..3 {
        assert!((tensor[[0, 100, 100, c]] - expected[c]).abs() < 1e-3);
    }
}

#[test]
fn test_verdict_parses_back_as_json() {
    let probs = probabilities(&[2.0, -1.0, 0.5, 0.25]);
    let labels = ClassLabels::defaults();
    let verdict = Prediction::new(
        labels.resolve(probs.top1()),
        probs.top1_conf(),
        probs.top1(),
    );

    let json = serde_json::to_string(&verdict).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(parsed["prediction"].is_string());
    assert!(parsed["confidence"].is_number());
    assert!(parsed["class_index"].is_u64());

    let confidence = parsed["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert_eq!(parsed["class_index"].as_u64().unwrap(), 0);
}

// Binary-level tests: spawn the compiled executable and assert on the process
// contract itself. None of these scenarios reach the ONNX runtime, so they
// need no model file.

fn run_binary(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_neuroscan-inference"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

/// Parse the process stdout as the single JSON error line and return the
/// message, asserting the one-line contract on the way.
fn single_error_line(output: &Output) -> String {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1, "stdout must be exactly one line");
    assert!(stdout.ends_with('\n'));

    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    parsed["error"].as_str().unwrap().to_string()
}

#[test]
fn test_binary_corrupt_image_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("broken.jpg");
    fs::write(&image_path, b"not an image").unwrap();

    let output = run_binary(
        dir.path(),
        &[
            "--image",
            image_path.to_str().unwrap(),
            "--model",
            "missing.onnx",
        ],
    );

    assert_eq!(output.status.code(), Some(1));

    let error = single_error_line(&output);
    assert!(error.starts_with("Error processing image: "));
    assert!(error.len() > "Error processing image: ".len());

    // The human-readable diagnostic goes to stderr.
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_binary_missing_model_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = save_test_image(dir.path());

    let output = run_binary(
        dir.path(),
        &[
            "--image",
            image_path.to_str().unwrap(),
            "--model",
            "missing.onnx",
        ],
    );

    assert_eq!(output.status.code(), Some(1));

    let error = single_error_line(&output);
    assert!(error.starts_with("Analysis failed: "));
    assert!(error.contains("missing.onnx"));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_binary_malformed_sidecar_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("class_labels.json"), "not json").unwrap();
    let image_path = save_test_image(dir.path());

    let output = run_binary(
        dir.path(),
        &[
            "--image",
            image_path.to_str().unwrap(),
            "--model",
            "missing.onnx",
        ],
    );

    assert_eq!(output.status.code(), Some(1));

    let error = single_error_line(&output);
    assert!(error.starts_with("Analysis failed: Label file error:"));
}

#[test]
fn test_binary_missing_flag_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_binary(dir.path(), &["--image", "scan.jpg"]);

    // Clap rejects the command line before the pipeline starts: usage text on
    // stderr, nothing on stdout.
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}
