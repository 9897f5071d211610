//! CLI output formatting.
//!
//! Each result leads with its positional index and the source file name;
//! dimensions, encoding settings or the error are indented context lines.
//!
//! ## Resize
//!
//! ```text
//! 001 dawn.jpg → resized-dawn.jpg
//!     800x400 → 200x100 (jpeg, quality 85, bilinear)
//! 002 dusk.bmp
//!     Error: unsupported image type 'bmp' for dusk.bmp; supported: gif, jpeg, jpg, png
//!
//! Resized 1 of 2 images
//! ```
//!
//! ## Presets
//!
//! ```text
//! safe
//!     width 10–8000, height 10–8000, ratio 0.1–2
//!     quality 50–95 (default 85), interlace off
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write to stdout.

use crate::config::{BoundsConfig, Preset};
use crate::error::ResizeError;
use crate::imaging::Dimensions;
use crate::resizer::ResizeOutcome;
use crate::types::ImageFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn size(d: Dimensions) -> String {
    format!("{}x{}", d.width, d.height)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

// ============================================================================
// Resize output
// ============================================================================

pub fn format_outcome(index: usize, outcome: &ResizeOutcome) -> Vec<String> {
    let mut settings = vec![outcome.format.to_string()];
    // GIF ignores quality
    if outcome.format != ImageFormat::Gif {
        settings.push(format!("quality {}", outcome.quality));
    }
    settings.push(outcome.filter.to_string());
    if outcome.interlace {
        settings.push("interlace".to_string());
    }

    vec![
        format!(
            "{} {} → {}",
            format_index(index),
            file_name(&outcome.source),
            file_name(&outcome.target)
        ),
        format!(
            "{}{} → {} ({})",
            indent(1),
            size(outcome.original),
            size(outcome.resized),
            settings.join(", ")
        ),
    ]
}

pub fn format_failure(index: usize, source: &Path, error: &ResizeError) -> Vec<String> {
    vec![
        format!("{} {}", format_index(index), file_name(source)),
        format!("{}Error: {}", indent(1), error),
    ]
}

/// Format a full batch, one entry per source plus a summary line.
pub fn format_resize_results(
    results: &[(PathBuf, Result<ResizeOutcome, ResizeError>)],
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut succeeded = 0;

    for (i, (source, result)) in results.iter().enumerate() {
        match result {
            Ok(outcome) => {
                succeeded += 1;
                lines.extend(format_outcome(i + 1, outcome));
            }
            Err(e) => lines.extend(format_failure(i + 1, source, e)),
        }
    }

    lines.push(String::new());
    let noun = if results.len() == 1 { "image" } else { "images" };
    lines.push(format!("Resized {} of {} {}", succeeded, results.len(), noun));
    lines
}

pub fn print_resize_results(results: &[(PathBuf, Result<ResizeOutcome, ResizeError>)]) {
    for line in format_resize_results(results) {
        println!("{}", line);
    }
}

// ============================================================================
// Presets output
// ============================================================================

pub fn format_bounds(config: &BoundsConfig) -> Vec<String> {
    vec![
        format!(
            "{}width {}–{}, height {}–{}, ratio {}–{}",
            indent(1),
            config.min_width(),
            config.max_width(),
            config.min_height(),
            config.max_height(),
            config.min_ratio(),
            config.max_ratio()
        ),
        format!(
            "{}quality {}–{} (default {}), interlace {}",
            indent(1),
            config.min_quality(),
            config.max_quality(),
            config.default_quality(),
            on_off(config.default_interlace())
        ),
    ]
}

pub fn format_presets() -> Vec<String> {
    let mut lines = Vec::new();
    for preset in Preset::ALL {
        lines.push(preset.to_string());
        lines.extend(format_bounds(&BoundsConfig::preset(preset)));
    }
    lines
}

pub fn print_presets() {
    for line in format_presets() {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScaleFilter;

    fn outcome(format: ImageFormat, interlace: bool) -> ResizeOutcome {
        ResizeOutcome {
            source: "/photos/dawn.jpg".into(),
            target: "/photos/resized-dawn.jpg".into(),
            format,
            original: Dimensions::new(400, 800),
            resized: Dimensions::new(100, 200),
            quality: 85,
            interlace,
            filter: ScaleFilter::BilinearFixed,
        }
    }

    #[test]
    fn outcome_lines() {
        let lines = format_outcome(1, &outcome(ImageFormat::Jpeg, false));
        assert_eq!(
            lines,
            vec![
                "001 dawn.jpg → resized-dawn.jpg",
                "    800x400 → 200x100 (jpeg, quality 85, bilinear)",
            ]
        );
    }

    #[test]
    fn gif_omits_quality_and_shows_interlace() {
        let lines = format_outcome(2, &outcome(ImageFormat::Gif, true));
        assert_eq!(lines[1], "    800x400 → 200x100 (gif, bilinear, interlace)");
    }

    #[test]
    fn failure_lines() {
        let lines = format_failure(
            3,
            Path::new("/photos/missing.png"),
            &ResizeError::PathNotFound("/photos/missing.png".into()),
        );
        assert_eq!(lines[0], "003 missing.png");
        assert_eq!(lines[1], "    Error: path not found: /photos/missing.png");
    }

    #[test]
    fn batch_summary_counts_successes() {
        let results = vec![
            (
                PathBuf::from("/photos/dawn.jpg"),
                Ok(outcome(ImageFormat::Jpeg, false)),
            ),
            (
                PathBuf::from("/photos/missing.png"),
                Err(ResizeError::PathNotFound("/photos/missing.png".into())),
            ),
        ];
        let lines = format_resize_results(&results);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Resized 1 of 2 images");
    }

    #[test]
    fn single_result_summary_is_singular() {
        let results = vec![(
            PathBuf::from("/photos/dawn.jpg"),
            Ok(outcome(ImageFormat::Jpeg, false)),
        )];
        let lines = format_resize_results(&results);
        assert_eq!(lines.last().unwrap(), "Resized 1 of 1 image");
    }

    #[test]
    fn presets_listed_in_order() {
        let lines = format_presets();
        assert_eq!(lines.len(), Preset::ALL.len() * 3);
        assert_eq!(lines[0], "default");
        assert_eq!(lines[3], "safe");
        assert_eq!(lines[4], "    width 10–8000, height 10–8000, ratio 0.1–2");
        assert_eq!(lines[5], "    quality 50–95 (default 85), interlace off");
    }
}
