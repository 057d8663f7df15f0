// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Command-line entry point.
//!
//! Parses the two required flags, runs one analysis pass, and writes exactly
//! one line of JSON to stdout before exiting 0 (verdict) or 1 (failure
//! report). Human-readable diagnostics go to stderr only.

use std::io::Write;
use std::process;

use clap::Parser;
use serde::Serialize;

use neuroscan_inference::cli::args::Cli;
use neuroscan_inference::error;
use neuroscan_inference::{ClassLabels, FailureReport, analyze};

fn main() {
    let cli = Cli::parse();

    // No tracing subscriber is installed, so ONNX Runtime's internal events
    // are dropped instead of leaking into the console. Stdout stays reserved
    // for the single JSON verdict.

    // Labels come from the sidecar (or the built-in fallback) and are passed
    // into the pipeline rather than read mid-analysis.
    let labels = match ClassLabels::load() {
        Ok(labels) => labels,
        Err(err) => {
            error!("{err}");
            let _ = emit(&FailureReport::from(&err));
            process::exit(1);
        }
    };

    match analyze(&cli.image, &cli.model, &labels) {
        Ok(verdict) => {
            // Exit 0 is only valid with the verdict actually on stdout.
            if let Err(write_err) = emit(&verdict) {
                error!("Failed to write verdict to stdout: {write_err}");
                process::exit(1);
            }
        }
        Err(err) => {
            error!("{err}");
            let _ = emit(&FailureReport::from(&err));
            process::exit(1);
        }
    }
}

/// Serialize `value` and write it to `writer` as one line of JSON.
fn write_verdict<T: Serialize, W: Write>(value: &T, writer: &mut W) -> std::io::Result<()> {
    let line = serde_json::to_string(value).unwrap_or_else(|_| {
        r#"{"error":"Analysis failed: could not serialize result"}"#.to_string()
    });
    writeln!(writer, "{line}")
}

/// Write `value` to stdout as a single flushed line of JSON.
fn emit<T: Serialize>(value: &T) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    // Flush anything already buffered so no stray write precedes the verdict,
    // then flush again so the line survives an abrupt process exit.
    let _ = stdout.flush();
    let result = write_verdict(value, &mut stdout);
    let _ = stdout.flush();
    result
}
