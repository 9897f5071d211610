//! Parameter types for the encode step.
//!
//! These describe *what* the output should look like; the backend decides
//! *how* to produce it.
//!
//! - [`Quality`]: 0–100 encoding quality. Used verbatim for JPEG, mapped
//!   onto a 0–10 compression level for PNG, ignored for GIF.
//! - [`EncodeOptions`]: filter, interlace flag and quality after defaults
//!   from the [`BoundsConfig`] have been filled in.

use crate::config::BoundsConfig;
use crate::types::{OptionKey, Options, ScaleFilter};

/// Encoding quality (0-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Zlib-style level: `round((100 - q) / 10)`, so 100 is 0 and 0 is 10.
    pub fn png_compression_level(self) -> u32 {
        ((100 - self.0) as f64 / 10.0).round() as u32
    }

    /// JPEG encoders reject quality 0; the floor is 1.
    pub fn jpeg_quality(self) -> u8 {
        self.0.clamp(1, 100) as u8
    }
}

/// Output options with every default resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub filter: ScaleFilter,
    pub interlace: bool,
    pub quality: Quality,
}

impl EncodeOptions {
    /// Read already-validated options, falling back to the config defaults.
    pub fn resolve(options: &Options, config: &BoundsConfig) -> Self {
        let filter = options
            .get(&OptionKey::ScaleMode)
            .and_then(|v| v.as_int())
            .and_then(ScaleFilter::from_code)
            .unwrap_or_default();
        let interlace = options
            .get(&OptionKey::Interlace)
            .and_then(|v| v.as_bool())
            .unwrap_or(config.default_interlace());
        let quality = options
            .get(&OptionKey::Quality)
            .and_then(|v| v.as_int())
            .and_then(|q| u32::try_from(q).ok())
            .unwrap_or(config.default_quality());
        Self {
            filter,
            interlace,
            quality: Quality::new(quality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundsOverrides;
    use crate::value::Value;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 0);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn png_compression_levels() {
        assert_eq!(Quality::new(100).png_compression_level(), 0);
        assert_eq!(Quality::new(95).png_compression_level(), 1);
        assert_eq!(Quality::new(85).png_compression_level(), 2);
        assert_eq!(Quality::new(80).png_compression_level(), 2);
        assert_eq!(Quality::new(0).png_compression_level(), 10);
    }

    #[test]
    fn jpeg_quality_floor() {
        assert_eq!(Quality::new(0).jpeg_quality(), 1);
        assert_eq!(Quality::new(80).jpeg_quality(), 80);
    }

    #[test]
    fn resolve_uses_config_defaults() {
        let config = BoundsConfig::safe().merge(BoundsOverrides {
            default_interlace: Some(true),
            ..Default::default()
        });
        let resolved = EncodeOptions::resolve(&Options::new(), &config);
        assert_eq!(
            resolved,
            EncodeOptions {
                filter: ScaleFilter::BilinearFixed,
                interlace: true,
                quality: Quality::new(85),
            }
        );
    }

    #[test]
    fn resolve_prefers_explicit_options() {
        let options = Options::from([
            (OptionKey::ScaleMode, Value::Int(16)),
            (OptionKey::Interlace, Value::Bool(false)),
            (OptionKey::Quality, Value::Int(60)),
        ]);
        let config = BoundsConfig::default().merge(BoundsOverrides {
            default_interlace: Some(true),
            ..Default::default()
        });
        let resolved = EncodeOptions::resolve(&options, &config);
        assert_eq!(resolved.filter, ScaleFilter::NearestNeighbour);
        assert!(!resolved.interlace);
        assert_eq!(resolved.quality.value(), 60);
    }
}
