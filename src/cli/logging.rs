// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Stderr logging macros.
//!
//! Standard output carries exactly one JSON verdict per run, so every
//! diagnostic goes to stderr. No `tracing` subscriber is installed anywhere
//! in the binary, which keeps ONNX Runtime's internal log events from
//! reaching the console at all.

/// Macro for warning messages.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "WARNING ⚠️".yellow().bold(), format!($($arg)*));
    }}
}

/// Macro for error messages.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), format!($($arg)*));
    }}
}
