//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the pixel work a run needs: check that
//! the codecs are there, read dimensions, decode, resample and encode. The
//! decoded image is an associated type so operations can decode a source once
//! and derive every variant from the same in-memory copy.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::{EncodeParams, ResizeParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
    #[error("Imaging capability unavailable: {0}")]
    Unavailable(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// In-memory decoded image. Dropping it releases the pixel buffer.
    type Image;

    /// Verify that the decoders and the encoder a run relies on are present.
    fn check_capabilities(&self) -> Result<(), BackendError>;

    /// Read dimensions from the file header without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image from disk.
    fn decode(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resample to exactly the requested dimensions.
    fn resize(
        &self,
        image: &Self::Image,
        params: &ResizeParams,
    ) -> Result<Self::Image, BackendError>;

    /// Encode and write, replacing any existing file at the output path.
    fn encode(&self, image: &Self::Image, params: &EncodeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend that records operations without touching pixels.
    ///
    /// Decoded "images" are just their dimensions. Paths not registered with
    /// [`MockBackend::with_image`] fail to decode, standing in for corrupt files.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: HashMap<String, Dimensions>,
        pub fail_encode: Option<String>,
        pub unavailable: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        CheckCapabilities,
        Identify(String),
        Decode(String),
        Resize {
            width: u32,
            height: u32,
        },
        Encode {
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(mut self, path: &Path, width: u32, height: u32) -> Self {
            self.images.insert(
                path.to_string_lossy().to_string(),
                Dimensions { width, height },
            );
            self
        }

        /// Fail any encode whose output path ends with `suffix`.
        pub fn failing_encode(mut self, suffix: &str) -> Self {
            self.fail_encode = Some(suffix.to_string());
            self
        }

        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn encoded_outputs(&self) -> Vec<(String, u32, u32)> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Encode {
                        output,
                        width,
                        height,
                        ..
                    } => Some((output, width, height)),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }

        fn lookup(&self, path: &Path) -> Result<Dimensions, BackendError> {
            let key = path.to_string_lossy().to_string();
            self.images.get(&key).copied().ok_or(BackendError::Decode {
                path: key,
                reason: "no mock image".to_string(),
            })
        }
    }

    impl ImageBackend for MockBackend {
        type Image = Dimensions;

        fn check_capabilities(&self) -> Result<(), BackendError> {
            self.record(RecordedOp::CheckCapabilities);
            if self.unavailable {
                return Err(BackendError::Unavailable("mock webp encoder".to_string()));
            }
            Ok(())
        }

        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::Identify(path.to_string_lossy().to_string()));
            self.lookup(path)
        }

        fn decode(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::Decode(path.to_string_lossy().to_string()));
            self.lookup(path)
        }

        fn dimensions(&self, image: &Dimensions) -> Dimensions {
            *image
        }

        fn resize(
            &self,
            _image: &Dimensions,
            params: &ResizeParams,
        ) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::Resize {
                width: params.width,
                height: params.height,
            });
            Ok(Dimensions {
                width: params.width,
                height: params.height,
            })
        }

        fn encode(&self, image: &Dimensions, params: &EncodeParams) -> Result<(), BackendError> {
            let output = params.output.to_string_lossy().to_string();
            self.record(RecordedOp::Encode {
                output: output.clone(),
                width: image.width,
                height: image.height,
                quality: params.quality.value(),
            });
            match &self.fail_encode {
                Some(suffix) if output.ends_with(suffix.as_str()) => Err(BackendError::Encode {
                    path: output,
                    reason: "mock encode failure".to_string(),
                }),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::new().with_image(Path::new("/shots/a.png"), 800, 600);

        let dims = backend.decode(Path::new("/shots/a.png")).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 800,
                height: 600
            }
        );

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/shots/a.png"));
    }

    #[test]
    fn mock_unknown_path_fails_decode() {
        let backend = MockBackend::new();
        let result = backend.decode(Path::new("/shots/corrupt.png"));
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    #[test]
    fn mock_encode_failure_matches_suffix() {
        let backend = MockBackend::new().failing_encode("-small.webp");
        let image = Dimensions {
            width: 10,
            height: 10,
        };

        let ok = backend.encode(
            &image,
            &EncodeParams {
                output: "/out/a.webp".into(),
                quality: crate::imaging::Quality::default(),
            },
        );
        let failed = backend.encode(
            &image,
            &EncodeParams {
                output: "/out/a-small.webp".into(),
                quality: crate::imaging::Quality::default(),
            },
        );

        assert!(ok.is_ok());
        assert!(matches!(failed, Err(BackendError::Encode { .. })));
    }
}
