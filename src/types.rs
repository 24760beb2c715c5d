//! Shared types used by the config, imaging and batch layers.
//!
//! Source and width tables are static for the length of a run: they are built
//! once from the resolved config and never mutated while the batch executes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One screenshot to optimize: an input filename and the base name its
/// outputs are written under.
///
/// `source` is relative to the screenshots directory, `name` carries no
/// extension and no variant suffix (e.g. `"hud-light"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub source: String,
    pub name: String,
}

impl SourceSpec {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }
}

/// A labelled target width. Each one produces a single responsive output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidthTarget {
    pub label: String,
    pub width: u32,
}

impl WidthTarget {
    pub fn new(label: impl Into<String>, width: u32) -> Self {
        Self {
            label: label.into(),
            width,
        }
    }
}

/// A file written by a run.
///
/// Paths are deterministic, so a later run overwrites the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    /// Variant label (`"large"`, `"small"`) or `"icon"`.
    pub label: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// False when the source was already within the target and passed through.
    pub resized: bool,
}

impl OutputArtifact {
    /// File name component of the output path, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
