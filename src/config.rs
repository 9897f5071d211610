//! Resize bounds configuration.
//!
//! A [`BoundsConfig`] holds the limits every validator checks against: the
//! accepted width/height range, the accepted scale ratio range, the accepted
//! quality range plus the quality and interlace defaults.
//!
//! Construction never fails. Raw values are clamped into their absolute
//! domain, inverted min/max pairs are swapped, and the default quality is
//! pulled into the final quality range. This is the opposite policy from the
//! validators (which reject bad input): the config is written by whoever
//! integrates the library, the validated values come from end users.
//!
//! ## Absolute domains
//!
//! | Field | Domain | Default |
//! |---|---|---|
//! | `minWidth`, `minHeight` | 1–50000 | 100 |
//! | `maxWidth`, `maxHeight` | 1–50000 | 2000 |
//! | `minRatio` / `maxRatio` | 0.01–10.0 | 0.01 / 10.0 |
//! | `minQuality` / `maxQuality` | 0–100 | 0 / 100 |
//! | `defaultQuality` | 0–100 | 80 |
//! | `defaultInterlace` | bool | false |
//!
//! ## Config file
//!
//! ```toml
//! preset = "safe"     # optional base: default, safe, strict, thumbnail, web, print
//!
//! [bounds]            # optional overrides on top of the preset
//! maxWidth = 4000
//! defaultQuality = 85
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

const ABSOLUTE_MIN_DIMENSION: i64 = 1;
const ABSOLUTE_MAX_DIMENSION: i64 = 50_000;
const ABSOLUTE_MIN_RATIO: f64 = 0.01;
const ABSOLUTE_MAX_RATIO: f64 = 10.0;
const ABSOLUTE_MIN_QUALITY: i64 = 0;
const ABSOLUTE_MAX_QUALITY: i64 = 100;

const DEFAULT_MIN_DIMENSION: i64 = 100;
const DEFAULT_MAX_DIMENSION: i64 = 2000;
const DEFAULT_QUALITY: i64 = 80;

/// Raw, possibly out-of-domain bound values. Absent fields take defaults.
///
/// Integers are signed so that negative input can be represented and
/// clamped rather than failing to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct BoundsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_quality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_interlace: Option<bool>,
}

impl BoundsOverrides {
    /// Layer `overlay` on top of `self`; fields set in `overlay` win.
    pub fn overlay(self, overlay: BoundsOverrides) -> BoundsOverrides {
        BoundsOverrides {
            min_width: overlay.min_width.or(self.min_width),
            max_width: overlay.max_width.or(self.max_width),
            min_height: overlay.min_height.or(self.min_height),
            max_height: overlay.max_height.or(self.max_height),
            min_ratio: overlay.min_ratio.or(self.min_ratio),
            max_ratio: overlay.max_ratio.or(self.max_ratio),
            min_quality: overlay.min_quality.or(self.min_quality),
            max_quality: overlay.max_quality.or(self.max_quality),
            default_quality: overlay.default_quality.or(self.default_quality),
            default_interlace: overlay.default_interlace.or(self.default_interlace),
        }
    }
}

/// Normalized, internally consistent bounds. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsConfig {
    min_width: u32,
    max_width: u32,
    min_height: u32,
    max_height: u32,
    min_ratio: f64,
    max_ratio: f64,
    min_quality: u32,
    max_quality: u32,
    default_quality: u32,
    default_interlace: bool,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self::new(BoundsOverrides::default())
    }
}

fn clamp_dimension(value: i64) -> u32 {
    // Domain fits in u32, so the cast is lossless
    value.clamp(ABSOLUTE_MIN_DIMENSION, ABSOLUTE_MAX_DIMENSION) as u32
}

fn clamp_ratio(value: f64) -> f64 {
    if value.is_nan() {
        return ABSOLUTE_MIN_RATIO;
    }
    value.clamp(ABSOLUTE_MIN_RATIO, ABSOLUTE_MAX_RATIO)
}

fn clamp_quality(value: i64) -> u32 {
    value.clamp(ABSOLUTE_MIN_QUALITY, ABSOLUTE_MAX_QUALITY) as u32
}

fn ordered<T: PartialOrd>(min: T, max: T) -> (T, T) {
    if min > max { (max, min) } else { (min, max) }
}

impl BoundsConfig {
    /// Build a config from raw overrides, clamping and reordering as needed.
    pub fn new(raw: BoundsOverrides) -> Self {
        let (min_width, max_width) = ordered(
            clamp_dimension(raw.min_width.unwrap_or(DEFAULT_MIN_DIMENSION)),
            clamp_dimension(raw.max_width.unwrap_or(DEFAULT_MAX_DIMENSION)),
        );
        let (min_height, max_height) = ordered(
            clamp_dimension(raw.min_height.unwrap_or(DEFAULT_MIN_DIMENSION)),
            clamp_dimension(raw.max_height.unwrap_or(DEFAULT_MAX_DIMENSION)),
        );
        let (min_ratio, max_ratio) = ordered(
            clamp_ratio(raw.min_ratio.unwrap_or(ABSOLUTE_MIN_RATIO)),
            clamp_ratio(raw.max_ratio.unwrap_or(ABSOLUTE_MAX_RATIO)),
        );
        let (min_quality, max_quality) = ordered(
            clamp_quality(raw.min_quality.unwrap_or(ABSOLUTE_MIN_QUALITY)),
            clamp_quality(raw.max_quality.unwrap_or(ABSOLUTE_MAX_QUALITY)),
        );
        let default_quality = clamp_quality(raw.default_quality.unwrap_or(DEFAULT_QUALITY))
            .clamp(min_quality, max_quality);

        Self {
            min_width,
            max_width,
            min_height,
            max_height,
            min_ratio,
            max_ratio,
            min_quality,
            max_quality,
            default_quality,
            default_interlace: raw.default_interlace.unwrap_or(false),
        }
    }

    pub fn preset(preset: Preset) -> Self {
        Self::new(preset.overrides())
    }

    /// No constraints beyond the stock defaults.
    pub fn default_preset() -> Self {
        Self::preset(Preset::Default)
    }

    /// Reasonable constraints for user-uploaded images on a public site.
    pub fn safe() -> Self {
        Self::preset(Preset::Safe)
    }

    /// Tight constraints for high-security environments.
    pub fn strict() -> Self {
        Self::preset(Preset::Strict)
    }

    pub fn thumbnail() -> Self {
        Self::preset(Preset::Thumbnail)
    }

    pub fn web() -> Self {
        Self::preset(Preset::Web)
    }

    pub fn print() -> Self {
        Self::preset(Preset::Print)
    }

    /// New config with `overrides` layered over the current values.
    ///
    /// The result is normalized again; `self` is left unchanged.
    pub fn merge(&self, overrides: BoundsOverrides) -> Self {
        Self::new(self.to_overrides().overlay(overrides))
    }

    /// Every current value as a fully-populated override record.
    pub fn to_overrides(&self) -> BoundsOverrides {
        BoundsOverrides {
            min_width: Some(self.min_width.into()),
            max_width: Some(self.max_width.into()),
            min_height: Some(self.min_height.into()),
            max_height: Some(self.max_height.into()),
            min_ratio: Some(self.min_ratio),
            max_ratio: Some(self.max_ratio),
            min_quality: Some(self.min_quality.into()),
            max_quality: Some(self.max_quality.into()),
            default_quality: Some(self.default_quality.into()),
            default_interlace: Some(self.default_interlace),
        }
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    pub fn max_ratio(&self) -> f64 {
        self.max_ratio
    }

    pub fn min_quality(&self) -> u32 {
        self.min_quality
    }

    pub fn max_quality(&self) -> u32 {
        self.max_quality
    }

    pub fn default_quality(&self) -> u32 {
        self.default_quality
    }

    pub fn default_interlace(&self) -> bool {
        self.default_interlace
    }
}

/// Named override maps. Each preset is materialized through [`BoundsConfig::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Default,
    Safe,
    Strict,
    Thumbnail,
    Web,
    Print,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Default,
        Preset::Safe,
        Preset::Strict,
        Preset::Thumbnail,
        Preset::Web,
        Preset::Print,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Safe => "safe",
            Preset::Strict => "strict",
            Preset::Thumbnail => "thumbnail",
            Preset::Web => "web",
            Preset::Print => "print",
        }
    }

    pub fn overrides(self) -> BoundsOverrides {
        match self {
            Preset::Default => BoundsOverrides::default(),
            Preset::Safe => BoundsOverrides {
                min_width: Some(10),
                max_width: Some(8000),
                min_height: Some(10),
                max_height: Some(8000),
                min_ratio: Some(0.1),
                max_ratio: Some(2.0),
                min_quality: Some(50),
                max_quality: Some(95),
                default_quality: Some(85),
                default_interlace: None,
            },
            Preset::Strict => BoundsOverrides {
                min_width: Some(100),
                max_width: Some(4000),
                min_height: Some(100),
                max_height: Some(4000),
                min_ratio: Some(0.5),
                max_ratio: Some(1.0),
                min_quality: Some(60),
                max_quality: Some(90),
                default_quality: Some(80),
                default_interlace: None,
            },
            Preset::Thumbnail => BoundsOverrides {
                max_width: Some(500),
                max_height: Some(500),
                min_quality: Some(70),
                max_quality: Some(85),
                default_quality: Some(75),
                ..BoundsOverrides::default()
            },
            Preset::Web => BoundsOverrides {
                max_width: Some(2000),
                max_height: Some(2000),
                min_quality: Some(70),
                max_quality: Some(90),
                default_quality: Some(80),
                ..BoundsOverrides::default()
            },
            Preset::Print => BoundsOverrides {
                max_width: Some(10000),
                max_height: Some(10000),
                min_quality: Some(85),
                max_quality: Some(100),
                default_quality: Some(95),
                ..BoundsOverrides::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                format!("unknown preset '{s}' (expected default, safe, strict, thumbnail, web or print)")
            })
    }
}

// =============================================================================
// Config file loading
// =============================================================================

/// On-disk shape of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Base preset the `[bounds]` table is layered on.
    pub preset: Option<Preset>,
    pub bounds: BoundsOverrides,
}

impl ConfigFile {
    pub fn into_config(self) -> BoundsConfig {
        BoundsConfig::preset(self.preset.unwrap_or_default()).merge(self.bounds)
    }
}

/// Parse config file contents into a normalized config.
pub fn parse_config(content: &str) -> Result<BoundsConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.into_config())
}

/// Read a config file without normalizing it, so callers can swap the preset.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and normalize a config file.
pub fn load_config(path: &Path) -> Result<BoundsConfig, ConfigError> {
    let config = load_config_file(path)?.into_config();
    tracing::debug!(path = %path.display(), ?config, "loaded bounds config");
    Ok(config)
}

/// Worker threads for batch work: `jobs` capped at the core count.
///
/// The user can constrain down, not up.
pub fn effective_threads(jobs: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    jobs.map(|n| n.clamp(1, cores)).unwrap_or(cores)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-resizer configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Out-of-range values are clamped into their domain, min/max pairs given
# in the wrong order are swapped. Unknown keys cause an error.

# Base preset the [bounds] table is layered on:
# default, safe, strict, thumbnail, web, print
preset = "default"

[bounds]
# Accepted target width/height in pixels (domain 1-50000).
minWidth = 100
maxWidth = 2000
minHeight = 100
maxHeight = 2000

# Accepted scale ratio for proportional resizing (domain 0.01-10.0).
minRatio = 0.01
maxRatio = 10.0

# Accepted encoding quality (domain 0-100) and the quality used when none
# is given. For PNG the quality becomes a compression level.
minQuality = 0
maxQuality = 100
defaultQuality = 80

# Interlace output when the caller does not say otherwise.
defaultInterlace = false
"##
}
