//! CLI output formatting.
//!
//! Every source is shown by its file name, with one indented line per output
//! or per problem underneath:
//!
//! ## Optimize
//!
//! ```text
//! Optimizing 10 images → docs/assets/images
//! HUD Light.png
//!     large: hud-light.webp (1800x1000, resized)
//!     small: hud-light-small.webp (900x500, resized)
//! HUD Dark.png
//!     Warning: source file not found: ShortcutCycle/.../HUD Dark.png
//! 1024.png
//!     icon: app-icon.webp (160x160, resized)
//!
//! Done! Processed 10 images: 17 files written, 1 missing
//! ```
//!
//! ## Check
//!
//! ```text
//! HUD Light.png (3600x2000)
//!     large: hud-light.webp → 1800x1000
//!     small: hud-light-small.webp → 900x500
//! HUD Dark.png
//!     Missing: ShortcutCycle/.../HUD Dark.png
//!
//! 10 sources: 9 ready, 1 missing
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` and is pure; the `print_*`
//! wrappers write to stdout.

use crate::batch::{BatchEvent, BatchReport, PlanStatus, PlannedSource};
use crate::types::OutputArtifact;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// File name of a source path, falling back to the full path.
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn artifact_line(artifact: &OutputArtifact) -> String {
    let how = if artifact.resized {
        "resized"
    } else {
        "original size"
    };
    format!(
        "{}{}: {} ({}x{}, {})",
        indent(1),
        artifact.label,
        artifact.file_name(),
        artifact.width,
        artifact.height,
        how
    )
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format one batch progress event.
pub fn format_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started {
            output_dir,
            source_count,
        } => vec![format!(
            "Optimizing {} → {}",
            plural(*source_count, "image", "images"),
            output_dir.display()
        )],
        BatchEvent::OutputDirCreated { path } => {
            vec![format!("Created output directory {}", path.display())]
        }
        BatchEvent::SourceMissing { source } => vec![
            source_name(source),
            format!(
                "{}Warning: source file not found: {}",
                indent(1),
                source.display()
            ),
        ],
        BatchEvent::SourceProcessed { source, artifacts } => {
            let mut lines = vec![source_name(source)];
            lines.extend(artifacts.iter().map(artifact_line));
            lines
        }
        BatchEvent::SourceFailed {
            source,
            written,
            error,
        } => {
            let mut lines = vec![source_name(source)];
            lines.extend(written.iter().map(artifact_line));
            lines.push(format!("{}Error: {}", indent(1), error));
            lines
        }
        // Totals come from the report, see format_summary
        BatchEvent::Finished { .. } => Vec::new(),
    }
}

/// Format the closing summary of a batch.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let mut line = format!(
        "Done! Processed {}: {} written",
        plural(report.processed, "image", "images"),
        plural(report.artifacts.len(), "file", "files")
    );
    if !report.missing.is_empty() {
        line.push_str(&format!(", {} missing", report.missing.len()));
    }
    if !report.failed.is_empty() {
        line.push_str(&format!(", {} failed", report.failed.len()));
    }
    vec![String::new(), line]
}

/// Format a dry-run plan.
pub fn format_plan(planned: &[PlannedSource]) -> Vec<String> {
    let mut lines = Vec::new();
    let (mut ready, mut missing, mut unreadable) = (0, 0, 0);

    for entry in planned {
        let name = source_name(&entry.source);
        match &entry.status {
            PlanStatus::Ready {
                dimensions,
                outputs,
            } => {
                ready += 1;
                lines.push(format!(
                    "{} ({}x{})",
                    name, dimensions.width, dimensions.height
                ));
                for out in outputs {
                    let note = if out.size.resized { "" } else { " (unchanged)" };
                    lines.push(format!(
                        "{}{}: {} → {}x{}{}",
                        indent(1),
                        out.label,
                        out.filename,
                        out.size.width,
                        out.size.height,
                        note
                    ));
                }
            }
            PlanStatus::Missing => {
                missing += 1;
                lines.push(name);
                lines.push(format!("{}Missing: {}", indent(1), entry.source.display()));
            }
            PlanStatus::Unreadable(error) => {
                unreadable += 1;
                lines.push(name);
                lines.push(format!("{}Unreadable: {}", indent(1), error));
            }
        }
    }

    let mut summary = format!(
        "{}: {} ready",
        plural(planned.len(), "source", "sources"),
        ready
    );
    if missing > 0 {
        summary.push_str(&format!(", {missing} missing"));
    }
    if unreadable > 0 {
        summary.push_str(&format!(", {unreadable} unreadable"));
    }
    lines.push(String::new());
    lines.push(summary);
    lines
}

/// Format the warning shown when the working directory does not look like
/// the project root. Empty when nothing is missing.
pub fn format_root_warning(root: &Path, missing_markers: &[String]) -> Vec<String> {
    if missing_markers.is_empty() {
        return Vec::new();
    }
    vec![
        "Warning: this does not look like the project root.".to_string(),
        format!("{}Root: {}", indent(1), root.display()),
        format!("{}Missing: {}", indent(1), missing_markers.join(", ")),
    ]
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_event(event: &BatchEvent) {
    print_lines(format_event(event));
}

pub fn print_summary(report: &BatchReport) {
    print_lines(format_summary(report));
}

pub fn print_plan(planned: &[PlannedSource]) {
    print_lines(format_plan(planned));
}

pub fn print_root_warning(root: &Path, missing_markers: &[String]) {
    print_lines(format_root_warning(root, missing_markers));
}
