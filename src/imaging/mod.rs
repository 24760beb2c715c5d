//! Image processing: decode, resample, lossy WebP encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | Lanczos3 via `DynamicImage::resize_exact` |
//! | **Encode** | libwebp via the `webp` crate |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{ScaledSize, fit_icon, fit_to_width};
pub use operations::{
    ICON_LABEL, IconConfig, PartialFailure, PlannedOutput, ResponsiveConfig, create_icon,
    create_variants, plan_icon, plan_variants,
};
pub use params::{EncodeParams, Quality, ResizeParams};
pub use rust_backend::RustBackend;
