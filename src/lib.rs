//! # Image Resizer
//!
//! Bounds-validated resizing of GIF, JPEG and PNG files.
//!
//! Every caller-supplied input (target width/height, scale ratio, quality,
//! interlace flag, resampling filter, source file, target directory) is
//! checked against a [`BoundsConfig`] before any pixel work happens. Bad
//! input fails early with an error naming the field, the offending value
//! and the accepted range.
//!
//! # Pipeline
//!
//! ```text
//! validate source → resolve target → probe size → compute dimensions
//!     → check target → decode → scale → interlace → encode → release
//! ```
//!
//! The steps before the probe touch only file metadata, so a rejected call
//! never reads pixels.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`value`] | Dynamically-typed input values, so type mismatches surface as errors |
//! | [`types`] | Closed key sets: transformations, options, strategies, filters, formats |
//! | [`config`] | Bounds normalization, presets, merge, TOML config file loading |
//! | [`validators`] | One validator per semantic field, built from the config |
//! | [`imaging`] | Dimension calculators, encode options, raster backend, per-call transform |
//! | [`resizer`] | The orchestrator: chainable setters, `resize`, parallel `resize_all` |
//! | [`error`] | [`ResizeError`] and its [`ErrorKind`] taxonomy |
//! | [`output`] | CLI output formatting |
//! | [`logger`] | `tracing-subscriber` setup for the binary |
//!
//! # Design Decisions
//!
//! ## Normalize the config, reject the input
//!
//! A [`BoundsConfig`] is written by the integrator and is never rejected:
//! out-of-domain values are clamped and inverted pairs swapped. Values set
//! on a [`Resizer`] come from end users and are rejected on the first
//! violation, with nothing stored.
//!
//! ## No coercion
//!
//! Inputs travel as a [`Value`]. `Int(200)` is a width, `Float(200.0)` and
//! `Str("200")` are not. Only the ratio accepts both integers and floats.
//!
//! ## Pure-Rust imaging
//!
//! The [`imaging::RustBackend`] uses the `image` crate, so the binary has no
//! system library dependencies. The backend sits behind the
//! [`imaging::RasterBackend`] trait, which lets the orchestration be tested
//! against a recording mock.

pub mod config;
pub mod error;
pub mod imaging;
pub mod logger;
pub mod output;
pub mod resizer;
pub mod types;
pub mod validators;
pub mod value;

pub use config::{BoundsConfig, BoundsOverrides, Preset};
pub use error::{ErrorKind, ResizeError};
pub use resizer::{ResizeOutcome, Resizer};
pub use types::{ImageFormat, OptionKey, ResizeStrategy, ScaleFilter, Transformation};
pub use value::Value;

#[cfg(test)]
pub(crate) mod test_helpers;
