//! Shared test utilities: synthetic source images and a throwaway project
//! layout matching the stock config.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project(&[("HUD Light.png", 3600, 2000)], Some((1024, 1024)));
//! let config = AppConfig::default();
//! let batch = BatchConfig::from_app_config(&config, tmp.path());
//! ```

use crate::config::AppConfig;
use image::{ImageEncoder, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

/// Write a PNG with a gradient fill so resampling has something to chew on.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
}

/// Create a temp project root laid out like the stock config expects.
///
/// `screenshots` are `(filename, width, height)` written into the stock
/// screenshots directory; `icon` is written at the stock icon path.
pub fn setup_project(screenshots: &[(&str, u32, u32)], icon: Option<(u32, u32)>) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let config = AppConfig::default();

    let shots = tmp.path().join(&config.screenshots.dir);
    std::fs::create_dir_all(&shots).unwrap();
    for (name, w, h) in screenshots {
        write_test_png(&shots.join(name), *w, *h);
    }

    if let Some((w, h)) = icon {
        let icon_path = tmp.path().join(&config.icon.source);
        std::fs::create_dir_all(icon_path.parent().unwrap()).unwrap();
        write_test_png(&icon_path, w, h);
    }

    std::fs::create_dir_all(tmp.path().join("docs")).unwrap();
    tmp
}
