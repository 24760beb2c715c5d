//! The batch driver.
//!
//! Runs every configured screenshot through [`optimize_variants`] and then the
//! icon through [`optimize_icon`], strictly in config order and on the calling
//! thread. Two severities exist:
//!
//! - **Fatal** ([`BatchError`]): the imaging capability check fails or the
//!   output directory cannot be created. Nothing is processed.
//! - **Per source** ([`SourceOutcome`]): a missing file is a warning, a
//!   decode/resize/encode failure is an error. Either way the batch moves on
//!   to the next source.
//!
//! ## Output Structure
//!
//! ```text
//! docs/assets/images/
//! ├── hud-light.webp          # primary variant (1800px)
//! ├── hud-light-small.webp    # secondary variant (900px)
//! ├── ...
//! └── app-icon.webp           # 160x160
//! ```
//!
//! Paths are deterministic and overwritten on every run; there is no
//! versioning and no cleanup of outputs from earlier runs.
//!
//! Progress is reported through a caller-supplied callback receiving
//! [`BatchEvent`]s, which [`crate::output`] turns into console lines.

use crate::config::AppConfig;
use crate::imaging::{
    BackendError, Dimensions, IconConfig, ImageBackend, PartialFailure, PlannedOutput, Quality,
    ResponsiveConfig, RustBackend, create_icon, create_variants, plan_icon, plan_variants,
};
use crate::types::{OutputArtifact, SourceSpec};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Required imaging capability is missing: {0}")]
    Capability(#[source] BackendError),
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The icon to process after the screenshots.
#[derive(Debug, Clone)]
pub struct IconJob {
    pub source: PathBuf,
    pub name: String,
    pub config: IconConfig,
}

/// Everything a run needs, with all paths already resolved.
///
/// Built from [`AppConfig`] in production; tests construct it directly with
/// temporary directories and synthetic file lists.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub screenshots_dir: PathBuf,
    pub sources: Vec<SourceSpec>,
    pub responsive: ResponsiveConfig,
    pub icon: Option<IconJob>,
    pub output_dir: PathBuf,
}

impl BatchConfig {
    /// Resolve an [`AppConfig`] against a project root.
    pub fn from_app_config(config: &AppConfig, root: &Path) -> Self {
        let quality = Quality::new(config.output.quality);
        Self {
            screenshots_dir: root.join(&config.screenshots.dir),
            sources: config.screenshots.sources(),
            responsive: ResponsiveConfig {
                variants: config.screenshots.variants.clone(),
                primary: config.screenshots.primary_variant.clone(),
                quality,
            },
            icon: Some(IconJob {
                source: root.join(&config.icon.source),
                name: config.icon.name.clone(),
                config: IconConfig {
                    max_size: config.icon.max_size,
                    quality,
                },
            }),
            output_dir: root.join(&config.output_dir),
        }
    }

    /// Number of source files a run will attempt.
    pub fn source_count(&self) -> usize {
        self.sources.len() + usize::from(self.icon.is_some())
    }
}

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Started {
        output_dir: PathBuf,
        source_count: usize,
    },
    OutputDirCreated {
        path: PathBuf,
    },
    SourceMissing {
        source: PathBuf,
    },
    SourceProcessed {
        source: PathBuf,
        artifacts: Vec<OutputArtifact>,
    },
    /// `written` lists outputs encoded before the failure; they are on disk.
    SourceFailed {
        source: PathBuf,
        written: Vec<OutputArtifact>,
        error: String,
    },
    Finished {
        processed: usize,
        written: usize,
    },
}

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Written(Vec<OutputArtifact>),
    Missing,
    Failed {
        written: Vec<OutputArtifact>,
        error: String,
    },
}

/// Totals for a finished batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Source files attempted, missing ones included. Not the number of outputs.
    pub processed: usize,
    pub artifacts: Vec<OutputArtifact>,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    fn record(&mut self, source: &Path, outcome: SourceOutcome) {
        self.processed += 1;
        match outcome {
            SourceOutcome::Written(artifacts) => self.artifacts.extend(artifacts),
            SourceOutcome::Missing => self.missing.push(source.to_path_buf()),
            SourceOutcome::Failed { written, error } => {
                self.artifacts.extend(written);
                self.failed.push((source.to_path_buf(), error));
            }
        }
    }
}

/// Shared tail of both tolerant operations: turn an operation result into an
/// outcome and report it.
fn settle(
    source: &Path,
    result: Result<Vec<OutputArtifact>, PartialFailure>,
    on_event: &mut impl FnMut(BatchEvent),
) -> SourceOutcome {
    match result {
        Ok(artifacts) => {
            on_event(BatchEvent::SourceProcessed {
                source: source.to_path_buf(),
                artifacts: artifacts.clone(),
            });
            SourceOutcome::Written(artifacts)
        }
        Err(PartialFailure { written, error }) => {
            let error = error.to_string();
            on_event(BatchEvent::SourceFailed {
                source: source.to_path_buf(),
                written: written.clone(),
                error: error.clone(),
            });
            SourceOutcome::Failed { written, error }
        }
    }
}

fn report_missing(source: &Path, on_event: &mut impl FnMut(BatchEvent)) -> SourceOutcome {
    on_event(BatchEvent::SourceMissing {
        source: source.to_path_buf(),
    });
    SourceOutcome::Missing
}

/// Produce every width variant of one screenshot, tolerating a missing or
/// broken source.
pub fn optimize_variants<B: ImageBackend>(
    backend: &B,
    source: &Path,
    base_name: &str,
    responsive: &ResponsiveConfig,
    output_dir: &Path,
    on_event: &mut impl FnMut(BatchEvent),
) -> SourceOutcome {
    if !source.is_file() {
        return report_missing(source, on_event);
    }
    let result = create_variants(backend, source, output_dir, base_name, responsive);
    settle(source, result, on_event)
}

/// Produce the square icon, tolerating a missing or broken source.
pub fn optimize_icon<B: ImageBackend>(
    backend: &B,
    source: &Path,
    name: &str,
    config: &IconConfig,
    output_dir: &Path,
    on_event: &mut impl FnMut(BatchEvent),
) -> SourceOutcome {
    if !source.is_file() {
        return report_missing(source, on_event);
    }
    let result = create_icon(backend, source, output_dir, name, config)
        .map(|a| vec![a])
        .map_err(PartialFailure::from);
    settle(source, result, on_event)
}

/// Run the batch with the production backend.
pub fn run_batch(
    config: &BatchConfig,
    on_event: &mut impl FnMut(BatchEvent),
) -> Result<BatchReport, BatchError> {
    run_batch_with_backend(&RustBackend::new(), config, on_event)
}

/// Run the batch using a specific backend (allows testing with mock).
pub fn run_batch_with_backend<B: ImageBackend>(
    backend: &B,
    config: &BatchConfig,
    on_event: &mut impl FnMut(BatchEvent),
) -> Result<BatchReport, BatchError> {
    backend
        .check_capabilities()
        .map_err(BatchError::Capability)?;

    on_event(BatchEvent::Started {
        output_dir: config.output_dir.clone(),
        source_count: config.source_count(),
    });

    let existed = config.output_dir.is_dir();
    std::fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;
    if !existed {
        on_event(BatchEvent::OutputDirCreated {
            path: config.output_dir.clone(),
        });
    }

    let mut report = BatchReport::default();

    for spec in &config.sources {
        let source = config.screenshots_dir.join(&spec.source);
        let outcome = optimize_variants(
            backend,
            &source,
            &spec.name,
            &config.responsive,
            &config.output_dir,
            on_event,
        );
        report.record(&source, outcome);
    }

    if let Some(icon) = &config.icon {
        let outcome = optimize_icon(
            backend,
            &icon.source,
            &icon.name,
            &icon.config,
            &config.output_dir,
            on_event,
        );
        report.record(&icon.source, outcome);
    }

    on_event(BatchEvent::Finished {
        processed: report.processed,
        written: report.artifacts.len(),
    });
    Ok(report)
}

// ============================================================================
// Dry run
// ============================================================================

/// Dry-run result for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSource {
    pub source: PathBuf,
    pub status: PlanStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanStatus {
    Ready {
        dimensions: Dimensions,
        outputs: Vec<PlannedOutput>,
    },
    Missing,
    Unreadable(String),
}

fn plan_source<B: ImageBackend>(
    backend: &B,
    source: PathBuf,
    outputs_for: impl FnOnce(Dimensions) -> Vec<PlannedOutput>,
) -> PlannedSource {
    let status = if !source.is_file() {
        PlanStatus::Missing
    } else {
        match backend.identify(&source) {
            Ok(dimensions) => PlanStatus::Ready {
                dimensions,
                outputs: outputs_for(dimensions),
            },
            Err(e) => PlanStatus::Unreadable(e.to_string()),
        }
    };
    PlannedSource { source, status }
}

/// Work out what a run would produce without decoding or writing anything.
pub fn plan_batch<B: ImageBackend>(backend: &B, config: &BatchConfig) -> Vec<PlannedSource> {
    let mut planned: Vec<PlannedSource> = config
        .sources
        .iter()
        .map(|spec| {
            plan_source(backend, config.screenshots_dir.join(&spec.source), |dims| {
                plan_variants(dims.as_tuple(), &spec.name, &config.responsive)
            })
        })
        .collect();

    if let Some(icon) = &config.icon {
        planned.push(plan_source(backend, icon.source.clone(), |dims| {
            vec![plan_icon(dims.as_tuple(), &icon.name, &icon.config)]
        }));
    }
    planned
}
