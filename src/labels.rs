// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Class label loading and resolution.
//!
//! Labels come from an optional `class_labels.json` sidecar file in the
//! working directory, holding a JSON array of strings. A missing sidecar
//! silently falls back to the built-in brain MRI label set; a sidecar that is
//! present but unreadable or malformed is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// File name of the optional label sidecar, resolved against the working directory.
pub const SIDECAR_FILE: &str = "class_labels.json";

/// Built-in label set for the four-class brain MRI model.
pub const DEFAULT_LABELS: [&str; 4] = [
    "No Tumor",
    "Glioma Tumor",
    "Meningioma Tumor",
    "Pituitary Tumor",
];

/// Ordered, index-addressable class label list.
///
/// Loaded once at startup and immutable afterwards. Entries are treated as
/// opaque strings; nothing about their content is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels {
    names: Vec<String>,
}

impl ClassLabels {
    /// Create labels from an explicit list of names.
    ///
    /// # Arguments
    ///
    /// * `names` - Class names ordered by model output index.
    ///
    /// # Returns
    ///
    /// * A new `ClassLabels` instance.
    #[must_use]
    pub const fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Create the built-in default label set.
    ///
    /// # Returns
    ///
    /// * The four-class brain MRI labels.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_LABELS.iter().map(ToString::to_string).collect())
    }

    /// Load labels from `class_labels.json` in the working directory.
    ///
    /// An absent sidecar is not an error; the default label set is returned
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidecar exists but cannot be read, or if its
    /// contents are not a JSON array of strings.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SIDECAR_FILE))
    }

    /// Load labels from a sidecar file at an explicit path.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the JSON array of class names.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed. A
    /// missing file falls back to [`ClassLabels::defaults`].
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::defaults()),
            Err(err) => return Err(AnalysisError::Io(err)),
        };

        let names: Vec<String> = serde_json::from_str(&contents).map_err(|e| {
            AnalysisError::LabelFile(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(Self::new(names))
    }

    /// Resolve a class index to its label.
    ///
    /// # Arguments
    ///
    /// * `class_index` - Index into the label list.
    ///
    /// # Returns
    ///
    /// * The label at `class_index`, or `"Class {class_index}"` when the index
    ///   falls outside the list (label/model mismatch fallback).
    #[must_use]
    pub fn resolve(&self, class_index: usize) -> String {
        self.names
            .get(class_index)
            .cloned()
            .unwrap_or_else(|| format!("Class {class_index}"))
    }

    /// Get a label by index without the fallback.
    #[must_use]
    pub fn get(&self, class_index: usize) -> Option<&str> {
        self.names.get(class_index).map(String::as_str)
    }

    /// Get the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the label list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self::defaults()
    }
}
