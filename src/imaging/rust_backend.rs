//! Pure Rust raster backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe | `image::image_dimensions` (header only) |
//! | Decode (GIF, JPEG, PNG) | `ImageReader` with the format forced from the extension |
//! | Scale | `DynamicImage::resize_exact` |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → PNG | `PngEncoder::new_with_quality`, adaptive row filter |
//! | Encode → GIF | `DynamicImage::write_to` |
//!
//! ## Filters
//!
//! | Scale filter | `FilterType` |
//! |---|---|
//! | nearest | `Nearest` |
//! | bilinear | `Triangle` |
//! | bicubic, bicubic-fixed | `CatmullRom` |
//!
//! None of the `image` encoders write interlaced PNG/GIF or progressive
//! JPEG, so the interlace flag is recorded on the handle and logged.

use super::backend::{BackendError, Dimensions, RasterBackend, RawImage};
use super::params::Quality;
use crate::types::{ImageFormat, ScaleFilter};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, CompressionType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug)]
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

fn filter_type(filter: ScaleFilter) -> FilterType {
    match filter {
        ScaleFilter::NearestNeighbour => FilterType::Nearest,
        ScaleFilter::BilinearFixed => FilterType::Triangle,
        ScaleFilter::Bicubic | ScaleFilter::BicubicFixed => FilterType::CatmullRom,
    }
}

/// Map a 0–10 compression level onto the encoder's presets.
fn png_compression(level: u32) -> CompressionType {
    match level {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn encode_failed(format: ImageFormat, e: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("{format} encode failed: {e}"))
}

impl RasterBackend for RustBackend {
    fn probe(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { height, width })
    }

    fn decode(&self, path: &Path, format: ImageFormat) -> Result<RawImage, BackendError> {
        let mut reader = ImageReader::open(path).map_err(BackendError::Io)?;
        reader.set_format(format.into());
        let pixels = reader.decode().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        Ok(RawImage::new(pixels))
    }

    fn scale(&self, image: &RawImage, size: Dimensions, filter: ScaleFilter) -> RawImage {
        match image.pixels() {
            Some(pixels) => RawImage::new(pixels.resize_exact(
                size.width,
                size.height,
                filter_type(filter),
            )),
            None => RawImage::empty(),
        }
    }

    fn set_interlace(&self, image: &mut RawImage, interlace: bool) {
        if interlace {
            tracing::warn!("interlaced output is not supported by the encoders; writing non-interlaced");
        }
        image.set_interlaced(interlace);
    }

    fn encode(
        &self,
        image: &RawImage,
        path: &Path,
        format: ImageFormat,
        quality: Quality,
    ) -> Result<(), BackendError> {
        let pixels = image
            .pixels()
            .ok_or_else(|| BackendError::ProcessingFailed("image buffer already released".into()))?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(writer, quality.jpeg_quality());
                DynamicImage::ImageRgb8(pixels.to_rgb8())
                    .write_with_encoder(encoder)
                    .map_err(|e| encode_failed(format, e))
            }
            ImageFormat::Png => {
                let level = quality.png_compression_level();
                tracing::debug!(level, "png compression level");
                let encoder = PngEncoder::new_with_quality(
                    writer,
                    png_compression(level),
                    png::FilterType::Adaptive,
                );
                pixels
                    .write_with_encoder(encoder)
                    .map_err(|e| encode_failed(format, e))
            }
            // GIF only takes RGB(A) frames
            ImageFormat::Gif => DynamicImage::ImageRgba8(pixels.to_rgba8())
                .write_to(&mut writer, image::ImageFormat::Gif)
                .map_err(|e| encode_failed(format, e)),
        }
    }
}
