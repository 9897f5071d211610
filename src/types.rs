//! Closed key sets and tagged choices shared across the pipeline.
//!
//! Every free-form name the caller can pass (transformation keys, option
//! keys, strategy names, filter names, file extensions) is parsed into one of
//! these enums at the boundary, so the validators and calculators only ever
//! match on a closed set.

use crate::validators::ValidatorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::value::Value;

/// Accumulated geometric inputs, keyed by transformation.
pub type Transformations = BTreeMap<Transformation, Value>;

/// Accumulated output-encoding inputs, keyed by option.
pub type Options = BTreeMap<OptionKey, Value>;

/// A named geometric input feeding a dimension calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Transformation {
    #[serde(rename = "setWidth")]
    SetWidth,
    #[serde(rename = "setHeight")]
    SetHeight,
    #[serde(rename = "setRatio")]
    SetRatio,
}

impl Transformation {
    pub const ALL: [Transformation; 3] = [
        Transformation::SetWidth,
        Transformation::SetHeight,
        Transformation::SetRatio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Transformation::SetWidth => "setWidth",
            Transformation::SetHeight => "setHeight",
            Transformation::SetRatio => "setRatio",
        }
    }

    /// The validator guarding values for this key.
    pub fn validator(self) -> ValidatorKind {
        match self {
            Transformation::SetWidth => ValidatorKind::Width,
            Transformation::SetHeight => ValidatorKind::Height,
            Transformation::SetRatio => ValidatorKind::Ratio,
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transformation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transformation::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown transformation '{s}'"))
    }
}

/// A named output-encoding input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    #[serde(rename = "mode")]
    ScaleMode,
    Quality,
    Interlace,
}

impl OptionKey {
    pub const ALL: [OptionKey; 3] = [OptionKey::ScaleMode, OptionKey::Quality, OptionKey::Interlace];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::ScaleMode => "mode",
            OptionKey::Quality => "quality",
            OptionKey::Interlace => "interlace",
        }
    }

    pub fn validator(self) -> ValidatorKind {
        match self {
            OptionKey::ScaleMode => ValidatorKind::ScaleFilter,
            OptionKey::Quality => ValidatorKind::Quality,
            OptionKey::Interlace => ValidatorKind::Interlace,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown option '{s}'"))
    }
}

/// Which dimension calculator a resize uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeStrategy {
    /// Scale both edges by `setRatio`.
    #[default]
    Proportional,
    /// Exact `setWidth` × `setHeight`, aspect ratio ignored.
    #[serde(rename = "fixed")]
    FixedBox,
    /// `setWidth`, height follows the source aspect ratio.
    FixedWidth,
    /// `setHeight`, width follows the source aspect ratio.
    FixedHeight,
}

impl ResizeStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeStrategy::Proportional => "proportional",
            ResizeStrategy::FixedBox => "fixed",
            ResizeStrategy::FixedWidth => "fixed_width",
            ResizeStrategy::FixedHeight => "fixed_height",
        }
    }
}

impl fmt::Display for ResizeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proportional" => Ok(ResizeStrategy::Proportional),
            "fixed" => Ok(ResizeStrategy::FixedBox),
            "fixed_width" => Ok(ResizeStrategy::FixedWidth),
            "fixed_height" => Ok(ResizeStrategy::FixedHeight),
            other => Err(format!(
                "unknown strategy '{other}' (expected proportional, fixed, fixed_width or fixed_height)"
            )),
        }
    }
}

/// Resampling filter for the scale step.
///
/// The numeric codes are what the `mode` option accepts; they match libgd's
/// `IMG_*` scale-mode constants so existing callers can keep passing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleFilter {
    #[serde(rename = "nearest")]
    NearestNeighbour,
    #[default]
    #[serde(rename = "bilinear")]
    BilinearFixed,
    Bicubic,
    BicubicFixed,
}

impl ScaleFilter {
    pub const ALL: [ScaleFilter; 4] = [
        ScaleFilter::NearestNeighbour,
        ScaleFilter::BilinearFixed,
        ScaleFilter::Bicubic,
        ScaleFilter::BicubicFixed,
    ];

    pub fn code(self) -> i64 {
        match self {
            ScaleFilter::NearestNeighbour => 16,
            ScaleFilter::BilinearFixed => 3,
            ScaleFilter::Bicubic => 4,
            ScaleFilter::BicubicFixed => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        ScaleFilter::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn allowed_codes() -> Vec<i64> {
        ScaleFilter::ALL.iter().map(|f| f.code()).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleFilter::NearestNeighbour => "nearest",
            ScaleFilter::BilinearFixed => "bilinear",
            ScaleFilter::Bicubic => "bicubic",
            ScaleFilter::BicubicFixed => "bicubic-fixed",
        }
    }
}

impl fmt::Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScaleFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                format!("unknown filter '{s}' (expected nearest, bilinear, bicubic or bicubic-fixed)")
            })
    }
}

/// Supported raster formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Png,
}

/// Accepted file extensions, matched case-sensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["gif", "jpeg", "jpg", "png"];

impl ImageFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gif" => Some(ImageFormat::Gif),
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        extension_of(path).and_then(Self::from_extension)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// The path's extension as UTF-8, if any.
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Extension with `jpeg` folded onto `jpg`, for source/target comparison.
pub fn normalized_extension(path: &Path) -> String {
    match extension_of(path) {
        Some("jpeg") => "jpg".to_string(),
        Some(ext) => ext.to_string(),
        None => String::new(),
    }
}
