//! Shared test utilities.
//!
//! Synthetic image writers (a small gradient so encoders have real content)
//! and an empty-file helper for tests that only need a path to exist.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::path::Path;

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

fn write_as(path: &Path, width: u32, height: u32, format: ImageFormat) {
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(gradient(width, height).to_rgba8()),
        _ => gradient(width, height),
    };
    img.save_with_format(path, format).unwrap();
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    write_as(path, width, height, ImageFormat::Png);
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    write_as(path, width, height, ImageFormat::Jpeg);
}

pub fn write_gif(path: &Path, width: u32, height: u32) {
    write_as(path, width, height, ImageFormat::Gif);
}

/// Create an empty file, parents included.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}
