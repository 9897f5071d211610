//! End-to-end resizes through the real `image` backend on generated files.

use image::{DynamicImage, RgbImage};
use image_resizer::config::parse_config;
use image_resizer::{
    BoundsConfig, ErrorKind, ImageFormat, OptionKey, ResizeStrategy, Resizer, ScaleFilter,
    Transformation,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_image(path: &Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    }));
    let img = if path.extension().is_some_and(|e| e == "gif") {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        img
    };
    img.save(path).unwrap();
}

fn dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).unwrap()
}

fn resizer(config: BoundsConfig) -> Resizer {
    Resizer::new(config, image_resizer::imaging::RustBackend::new())
}

#[test]
fn fixed_width_jpeg_keeps_aspect() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("wide.jpg");
    write_image(&source, 800, 400);
    let target = tmp.path().join("small.jpeg");

    let mut r = resizer(BoundsConfig::safe());
    r.set_strategy(ResizeStrategy::FixedWidth)
        .set_transformation(Transformation::SetWidth, 200)
        .unwrap();
    let outcome = r.resize(&source, Some(&target)).unwrap();

    assert_eq!(outcome.format, ImageFormat::Jpeg);
    assert_eq!(outcome.quality, 85);
    assert_eq!(dimensions(&target), (200, 100));
}

#[test]
fn proportional_png_with_derived_target() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("shot.png");
    write_image(&source, 300, 200);

    let mut r = resizer(BoundsConfig::default());
    r.set_transformation(Transformation::SetRatio, 0.5)
        .unwrap()
        .set_option(OptionKey::ScaleMode, ScaleFilter::NearestNeighbour.code())
        .unwrap();
    let outcome = r.resize(&source, None).unwrap();

    let expected = tmp.path().join("resized-shot.png");
    assert_eq!(outcome.target, expected);
    assert_eq!(dimensions(&expected), (150, 100));
}

#[test]
fn fixed_box_gif() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("anim.gif");
    write_image(&source, 120, 120);
    let target = tmp.path().join("box.gif");

    let mut r = resizer(BoundsConfig::default());
    r.set_strategy(ResizeStrategy::FixedBox)
        .set_transformation(Transformation::SetWidth, 300)
        .unwrap()
        .set_transformation(Transformation::SetHeight, 100)
        .unwrap()
        .set_option(OptionKey::Interlace, true)
        .unwrap();
    let outcome = r.resize(&source, Some(&target)).unwrap();

    assert!(outcome.interlace);
    assert_eq!(dimensions(&target), (300, 100));
}

#[test]
fn overwrites_existing_target() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("a.png");
    write_image(&source, 400, 400);
    let target = tmp.path().join("b.png");
    write_image(&target, 10, 10);

    let mut r = resizer(BoundsConfig::default());
    r.set_strategy(ResizeStrategy::FixedHeight)
        .set_transformation(Transformation::SetHeight, 100)
        .unwrap();
    r.resize(&source, Some(&target)).unwrap();
    assert_eq!(dimensions(&target), (100, 100));
}

#[test]
fn mismatched_target_left_unwritten() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("a.png");
    write_image(&source, 200, 200);
    let target = tmp.path().join("b.jpg");

    let mut r = resizer(BoundsConfig::default());
    r.set_transformation(Transformation::SetRatio, 1).unwrap();
    let err = r.resize(&source, Some(&target)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatMismatch);
    assert!(!target.exists());
}

#[test]
fn corrupt_source_is_decode_failure() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("broken.jpg");
    std::fs::write(&source, b"definitely not a jpeg").unwrap();

    let mut r = resizer(BoundsConfig::default());
    r.set_transformation(Transformation::SetRatio, 0.5).unwrap();
    assert_eq!(
        r.resize(&source, None).unwrap_err().kind(),
        ErrorKind::DecodeFailed
    );
}

#[test]
fn batch_resize_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = parse_config(
        r#"
preset = "thumbnail"

[bounds]
minWidth = 20
"#,
    )
    .unwrap();
    assert_eq!(config.min_width(), 20);
    assert_eq!(config.default_quality(), 75);

    let sources: Vec<PathBuf> = ["one.jpg", "two.png", "three.gif"]
        .iter()
        .map(|name| {
            let path = tmp.path().join(name);
            write_image(&path, 200, 100);
            path
        })
        .collect();

    let mut r = resizer(config);
    r.set_strategy(ResizeStrategy::FixedWidth)
        .set_transformation(Transformation::SetWidth, 50)
        .unwrap();
    let results = r.resize_all(&sources);

    assert_eq!(results.len(), 3);
    for ((source, result), expected) in results.iter().zip(&sources) {
        assert_eq!(source, expected);
        let outcome = result.as_ref().unwrap();
        assert_eq!(dimensions(&outcome.target), (50, 25));
    }
}
