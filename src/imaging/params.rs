//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the [`operations`](super::operations) module, which decides which outputs a
//! source gets, and the [`backend`](super::backend), which does the pixel
//! work. Operations can therefore be tested against a mock backend.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`ResizeParams`] — Exact output dimensions for a resample.
//! - [`EncodeParams`] — Output path and quality for an encode.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
///
/// Only built through [`Quality::new`] or [`Default`], so the value is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Exact target dimensions for a resample. Aspect handling happens before
/// these are built; the backend never adjusts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

/// Where and how to write an encoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub quality: Quality,
}
