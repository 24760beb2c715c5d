//! # asset-prep
//!
//! Prepares web-optimized images for the ShortcutCycle documentation site.
//! A fixed list of App Store screenshots is resized to one or more target
//! widths and the app icon is shrunk to a small square; everything is written
//! as lossy WebP into the docs asset directory.
//!
//! # Pipeline
//!
//! ```text
//! asset-prep.toml ─┐
//!                  ├─ config ─→ BatchConfig ─→ batch ─→ docs/assets/images/*.webp
//! stock defaults ──┘                             │
//!                                                └─→ BatchEvent ─→ output (stdout)
//! ```
//!
//! The batch is a flat, sequential loop. Each source is decoded once, every
//! variant is derived from that decoded image, and a missing or broken source
//! never stops the rest of the batch. Only a missing imaging capability or an
//! output directory that cannot be created aborts a run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `asset-prep.toml` loading, merging over stock defaults, validation |
//! | [`batch`] | Batch driver, tolerant per-source operations, dry-run planning |
//! | [`imaging`] | Dimension math, backend trait, `image` + libwebp backend |
//! | [`naming`] | Output filename policy and base-name derivation |
//! | [`types`] | `SourceSpec`, `WidthTarget`, `OutputArtifact` |
//! | [`output`] | CLI output formatting for events, summaries and plans |
//!
//! # Design Decisions
//!
//! ## Explicit Primary Variant
//!
//! The variant written without a suffix is named in config
//! (`screenshots.primary_variant`) instead of being whichever width happens to
//! be listed first. Reordering the variant list never renames files.
//!
//! ## Lossy WebP Through libwebp
//!
//! The `image` crate decodes every input and does the Lanczos3 resampling,
//! but its WebP encoder is lossless only. Encoding goes through the `webp`
//! crate so outputs can use a fixed lossy quality (80 by default).
//!
//! ## Overwrite, Never Version
//!
//! Output paths are a pure function of config, so a run replaces the files of
//! the previous run. Running twice with the same inputs yields byte-identical
//! outputs.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
