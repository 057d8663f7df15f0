// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

use std::path::PathBuf;

use clap::Parser;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"Output:
    Exactly one line of JSON on stdout, on every code path:
        {"prediction": "Glioma Tumor", "confidence": 0.97, "class_index": 1}   exit 0
        {"error": "Error processing image: <detail>"}                          exit 1
        {"error": "Analysis failed: <detail>"}                                 exit 1
    Diagnostics go to stderr only.

    An optional class_labels.json in the working directory (a JSON array of
    strings) overrides the built-in label set.

Examples:
    neuroscan-inference --image scan.jpg --model brain_tumor.onnx
    neuroscan-inference --image mri/slice_042.png --model models/brain_tumor.onnx"#)]
pub struct Cli {
    /// Path to the input scan image
    #[arg(long, value_name = "PATH")]
    pub image: PathBuf,

    /// Path to the ONNX classification model
    #[arg(long, value_name = "PATH")]
    pub model: PathBuf,
}
