// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! CLI module for the one-shot analysis binary.
//!
//! This module contains argument parsing and the stderr logging macros;
//! verdict serialization lives with the result types and the binary shell.

// Modules
/// CLI arguments.
pub mod args;

/// Stderr logging macros.
pub mod logging;
