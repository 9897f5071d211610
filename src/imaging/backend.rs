//! Raster backend trait and shared types.
//!
//! The [`RasterBackend`] trait is the raster-graphics collaborator: probe
//! dimensions, decode, scale, set interlace, encode. Pixel buffers travel as
//! [`RawImage`] handles that can be released explicitly.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording [`MockBackend`](tests::MockBackend).

use super::params::Quality;
use crate::types::{ImageFormat, ScaleFilter};
use image::DynamicImage;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

/// Decoded pixel buffer handle.
///
/// The buffer is dropped by [`release`](RawImage::release), which may be
/// called any number of times. A handle that was never populated starts out
/// released.
#[derive(Debug, Default)]
pub struct RawImage {
    pixels: Option<DynamicImage>,
    interlaced: bool,
}

impl RawImage {
    pub fn new(pixels: DynamicImage) -> Self {
        Self {
            pixels: Some(pixels),
            interlaced: false,
        }
    }

    /// A handle with no buffer behind it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pixels(&self) -> Option<&DynamicImage> {
        self.pixels.as_ref()
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.pixels
            .as_ref()
            .map(|p| Dimensions::new(p.height(), p.width()))
    }

    pub fn interlaced(&self) -> bool {
        self.interlaced
    }

    pub fn set_interlaced(&mut self, interlaced: bool) {
        self.interlaced = interlaced;
    }

    pub fn is_released(&self) -> bool {
        self.pixels.is_none()
    }

    pub fn release(&mut self) {
        self.pixels = None;
    }
}

/// Trait for raster backends.
///
/// Requires `Sync` so one backend can serve a parallel batch.
pub trait RasterBackend: Sync {
    /// Read the image size without a full decode.
    fn probe(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the file as `format`.
    fn decode(&self, path: &Path, format: ImageFormat) -> Result<RawImage, BackendError>;

    /// Resample to exactly `size`. A released input yields a released output.
    fn scale(&self, image: &RawImage, size: Dimensions, filter: ScaleFilter) -> RawImage;

    /// Best effort: backends that cannot write interlaced output only record the flag.
    fn set_interlace(&self, image: &mut RawImage, interlace: bool) {
        image.set_interlaced(interlace);
    }

    /// Write the buffer to `path`.
    fn encode(
        &self,
        image: &RawImage,
        path: &Path,
        format: ImageFormat,
        quality: Quality,
    ) -> Result<(), BackendError>;
}
