//! The per-call pixel pipeline.
//!
//! A [`Transform`] owns the decode and scale buffers for one resize. It
//! checks the target, then drives the backend through decode → scale →
//! interlace → encode. Both buffers are released when [`Transform::run`]
//! returns, whatever the outcome.

use super::backend::{Dimensions, RasterBackend, RawImage};
use super::params::EncodeOptions;
use crate::error::{ResizeError, Result};
use crate::types::{ImageFormat, extension_of, normalized_extension};
use crate::validators::is_writable;
use std::path::Path;

pub struct Transform<'a, B: RasterBackend> {
    backend: &'a B,
    source: &'a Path,
    target: &'a Path,
    format: ImageFormat,
    size: Dimensions,
    options: EncodeOptions,
    decoded: RawImage,
    scaled: RawImage,
}

impl<'a, B: RasterBackend> Transform<'a, B> {
    pub fn new(
        backend: &'a B,
        source: &'a Path,
        target: &'a Path,
        format: ImageFormat,
        size: Dimensions,
        options: EncodeOptions,
    ) -> Self {
        Self {
            backend,
            source,
            target,
            format,
            size,
            options,
            decoded: RawImage::empty(),
            scaled: RawImage::empty(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let result = self.execute();
        self.release();
        result
    }

    pub fn release(&mut self) {
        self.decoded.release();
        self.scaled.release();
    }

    pub fn is_released(&self) -> bool {
        self.decoded.is_released() && self.scaled.is_released()
    }

    fn execute(&mut self) -> Result<()> {
        self.check_target()?;

        tracing::debug!(source = %self.source.display(), format = %self.format, "decoding");
        self.decoded = self
            .backend
            .decode(self.source, self.format)
            .map_err(|source| ResizeError::DecodeFailed {
                path: self.source.to_path_buf(),
                format: self.format,
                source,
            })?;

        tracing::debug!(
            height = self.size.height,
            width = self.size.width,
            filter = %self.options.filter,
            "scaling"
        );
        self.scaled = self
            .backend
            .scale(&self.decoded, self.size, self.options.filter);
        self.decoded.release();
        self.backend
            .set_interlace(&mut self.scaled, self.options.interlace);

        tracing::debug!(output = %self.target.display(), quality = self.options.quality.value(), "encoding");
        self.backend
            .encode(&self.scaled, self.target, self.format, self.options.quality)
            .map_err(|source| ResizeError::EncodeFailed {
                path: self.target.to_path_buf(),
                source,
            })
    }

    /// An existing target must be writable and the extensions must agree.
    fn check_target(&self) -> Result<()> {
        if let Ok(meta) = std::fs::metadata(self.target) {
            if !is_writable(&meta) {
                return Err(ResizeError::PathNotWritable(self.target.to_path_buf()));
            }
        }
        if normalized_extension(self.target) != normalized_extension(self.source) {
            return Err(ResizeError::FormatMismatch {
                path: self.target.to_path_buf(),
                found: extension_of(self.target).unwrap_or_default().to_string(),
                expected: extension_of(self.source).unwrap_or_default().to_string(),
            });
        }
        Ok(())
    }
}

impl<B: RasterBackend> Drop for Transform<'_, B> {
    fn drop(&mut self) {
        self.release();
    }
}
