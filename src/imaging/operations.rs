//! High-level image operations.
//!
//! These functions combine calculations with backend execution. Each one
//! decodes its source exactly once; the decoded image is dropped when the
//! function returns, on success and on every error path.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{ScaledSize, fit_icon, fit_to_width};
use super::params::{EncodeParams, Quality, ResizeParams};
use crate::naming::{asset_filename, variant_filename};
use crate::types::{OutputArtifact, WidthTarget};
use std::path::Path;
use thiserror::Error;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A source whose outputs stopped partway through.
///
/// `written` holds the outputs encoded before `error`; they stay on disk.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct PartialFailure {
    pub written: Vec<OutputArtifact>,
    pub error: BackendError,
}

impl From<BackendError> for PartialFailure {
    fn from(error: BackendError) -> Self {
        Self {
            written: Vec::new(),
            error,
        }
    }
}

/// Label recorded on icon artifacts.
pub const ICON_LABEL: &str = "icon";

/// Configuration for responsive screenshot variants.
#[derive(Debug, Clone)]
pub struct ResponsiveConfig {
    pub variants: Vec<WidthTarget>,
    /// Label of the variant written without a suffix.
    pub primary: String,
    pub quality: Quality,
}

impl ResponsiveConfig {
    /// A single implicit full-size target, for assets that only need one output.
    pub fn single(max_width: u32, quality: Quality) -> Self {
        Self {
            variants: vec![WidthTarget::new("full", max_width)],
            primary: "full".to_string(),
            quality,
        }
    }

    /// Output filename for one of this config's variants.
    pub fn filename(&self, base: &str, label: &str) -> String {
        variant_filename(base, label, &self.primary, self.variants.len())
    }
}

/// Configuration for the square app icon.
#[derive(Debug, Clone, Copy)]
pub struct IconConfig {
    pub max_size: u32,
    pub quality: Quality,
}

/// A planned output: what a real run would write, computed from dimensions alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub label: String,
    pub filename: String,
    pub size: ScaledSize,
}

/// Plan the variant outputs for a source of the given dimensions.
pub fn plan_variants(
    original: (u32, u32),
    base_name: &str,
    config: &ResponsiveConfig,
) -> Vec<PlannedOutput> {
    config
        .variants
        .iter()
        .map(|target| PlannedOutput {
            label: target.label.clone(),
            filename: config.filename(base_name, &target.label),
            size: fit_to_width(original, target.width),
        })
        .collect()
}

/// Plan the icon output for a source of the given dimensions.
pub fn plan_icon(original: (u32, u32), name: &str, config: &IconConfig) -> PlannedOutput {
    PlannedOutput {
        label: ICON_LABEL.to_string(),
        filename: asset_filename(name),
        size: fit_icon(original, config.max_size),
    }
}

/// Resample (when the plan calls for it) and encode one planned output.
fn write_planned<B: ImageBackend>(
    backend: &B,
    image: &B::Image,
    output_dir: &Path,
    planned: PlannedOutput,
    quality: Quality,
) -> Result<OutputArtifact> {
    let path = output_dir.join(&planned.filename);
    let params = EncodeParams {
        output: path.clone(),
        quality,
    };

    if planned.size.resized {
        let resized = backend.resize(
            image,
            &ResizeParams {
                width: planned.size.width,
                height: planned.size.height,
            },
        )?;
        backend.encode(&resized, &params)?;
    } else {
        backend.encode(image, &params)?;
    }

    Ok(OutputArtifact {
        label: planned.label,
        path,
        width: planned.size.width,
        height: planned.size.height,
        resized: planned.size.resized,
    })
}

/// Create every width variant of a screenshot.
///
/// Variants are independent: each is derived from the decoded original, never
/// from a smaller sibling. The first failure aborts the remaining variants of
/// this source; files already written stay in place and are returned in the
/// [`PartialFailure`].
pub fn create_variants<B: ImageBackend>(
    backend: &B,
    source: &Path,
    output_dir: &Path,
    base_name: &str,
    config: &ResponsiveConfig,
) -> std::result::Result<Vec<OutputArtifact>, PartialFailure> {
    let image = backend.decode(source)?;
    let original = backend.dimensions(&image).as_tuple();

    let mut written = Vec::new();
    for planned in plan_variants(original, base_name, config) {
        match write_planned(backend, &image, output_dir, planned, config.quality) {
            Ok(artifact) => written.push(artifact),
            Err(error) => return Err(PartialFailure { written, error }),
        }
    }
    Ok(written)
}

/// Create the square icon output.
pub fn create_icon<B: ImageBackend>(
    backend: &B,
    source: &Path,
    output_dir: &Path,
    name: &str,
    config: &IconConfig,
) -> Result<OutputArtifact> {
    let image = backend.decode(source)?;
    let original = backend.dimensions(&image).as_tuple();
    let planned = plan_icon(original, name, config);
    write_planned(backend, &image, output_dir, planned, config.quality)
}
