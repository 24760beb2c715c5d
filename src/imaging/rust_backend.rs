//! Production backend built on the `image` crate and libwebp.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (PNG, JPEG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → lossy WebP | `webp::Encoder` (libwebp) |
//!
//! The `image` crate only writes lossless WebP, which is why encoding goes
//! through the `webp` crate instead.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{EncodeParams, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::path::Path;

/// Input formats a run cannot do without. Screenshots are PNG exports; JPEG
/// covers hand-edited replacements.
const REQUIRED_DECODERS: &[(&str, ImageFormat)] =
    &[("PNG", ImageFormat::Png), ("JPEG", ImageFormat::Jpeg)];

/// Backend using `image` for decode/resample and `webp` for encode.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// libwebp accepts only 8-bit RGB and RGBA buffers. Everything else (16-bit
/// PNGs, grayscale, float) is converted first, keeping alpha when present.
fn to_encodable(img: &DynamicImage) -> Cow<'_, DynamicImage> {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(img),
        other if other.color().has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgba8(other.to_rgba8()))
        }
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn check_capabilities(&self) -> Result<(), BackendError> {
        for (name, format) in REQUIRED_DECODERS {
            if !format.reading_enabled() {
                return Err(BackendError::Unavailable(format!(
                    "{name} decoder is not compiled in"
                )));
            }
        }

        // Probe the encoder with a single pixel rather than trusting the link.
        let probe = webp::Encoder::from_rgb(&[0, 0, 0], 1, 1)
            .encode_simple(false, 80.0)
            .map_err(|e| BackendError::Unavailable(format!("libwebp encoder failed: {e:?}")))?;
        if probe.is_empty() {
            return Err(BackendError::Unavailable(
                "libwebp encoder produced no output".to_string(),
            ));
        }
        Ok(())
    }

    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        let (width, height) = image.dimensions();
        Dimensions { width, height }
    }

    fn resize(
        &self,
        image: &DynamicImage,
        params: &ResizeParams,
    ) -> Result<DynamicImage, BackendError> {
        Ok(image.resize_exact(params.width, params.height, FilterType::Lanczos3))
    }

    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<(), BackendError> {
        let encodable = to_encodable(image);
        let encoder = webp::Encoder::from_image(&encodable).map_err(|e| BackendError::Encode {
            path: params.output.display().to_string(),
            reason: e.to_string(),
        })?;
        // libwebp rejects some inputs outright, e.g. any side over 16383px
        let encoded = encoder
            .encode_simple(false, params.quality.value() as f32)
            .map_err(|e| BackendError::Encode {
                path: params.output.display().to_string(),
                reason: format!("{e:?}"),
            })?;
        std::fs::write(&params.output, &*encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::test_helpers::write_test_png;

    fn encode_params(output: &Path) -> EncodeParams {
        EncodeParams {
            output: output.to_path_buf(),
            quality: Quality::default(),
        }
    }

    #[test]
    fn capabilities_available() {
        RustBackend::new().check_capabilities().unwrap();
    }

    #[test]
    fn identify_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("shot.png");
        write_test_png(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims.as_tuple(), (200, 150));
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/shot.png"));
        assert!(result.is_err());
    }

    #[test]
    fn decode_nonexistent_file_is_io_error() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/shot.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = RustBackend::new().decode(&path);
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    #[test]
    fn decode_sniffs_content_not_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("mislabeled.jpg");
        write_test_png(&path, 40, 30);

        let img = RustBackend::new().decode(&path).unwrap();
        assert_eq!(img.dimensions(), (40, 30));
    }

    #[test]
    fn resize_gives_exact_dimensions() {
        let backend = RustBackend::new();
        let img = DynamicImage::new_rgb8(400, 300);

        let resized = backend
            .resize(
                &img,
                &ResizeParams {
                    width: 160,
                    height: 160,
                },
            )
            .unwrap();
        assert_eq!(backend.dimensions(&resized).as_tuple(), (160, 160));
    }

    #[test]
    fn encode_writes_decodable_webp() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.webp");
        let backend = RustBackend::new();

        backend
            .encode(&DynamicImage::new_rgb8(120, 80), &encode_params(&output))
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
        assert_eq!(image::image_dimensions(&output).unwrap(), (120, 80));
    }

    #[test]
    fn encode_converts_grayscale_and_16_bit() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();

        let gray = tmp.path().join("gray.webp");
        backend
            .encode(&DynamicImage::new_luma8(32, 32), &encode_params(&gray))
            .unwrap();
        assert_eq!(image::image_dimensions(&gray).unwrap(), (32, 32));

        let deep = tmp.path().join("deep.webp");
        backend
            .encode(&DynamicImage::new_rgba16(24, 16), &encode_params(&deep))
            .unwrap();
        assert_eq!(image::image_dimensions(&deep).unwrap(), (24, 16));
    }

    #[test]
    fn encode_overwrites_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.webp");
        std::fs::write(&output, b"stale contents from a previous run").unwrap();

        RustBackend::new()
            .encode(&DynamicImage::new_rgb8(16, 16), &encode_params(&output))
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[test]
    fn encode_oversized_image_is_encode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("tall.webp");

        let result = RustBackend::new().encode(
            &DynamicImage::new_rgb8(10, 17000),
            &encode_params(&output),
        );
        assert!(matches!(result, Err(BackendError::Encode { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn encode_into_missing_directory_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("no-such-dir").join("out.webp");

        let result =
            RustBackend::new().encode(&DynamicImage::new_rgb8(8, 8), &encode_params(&output));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
