//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Probe** | `image::image_dimensions` |
//! | **Decode** | `image::ImageReader` (GIF, JPEG, PNG) |
//! | **Scale** | `resize_exact` with the requested filter |
//! | **Encode** | JPEG / PNG / GIF encoders from `image::codecs` |
//!
//! The module is split into:
//! - **Calculations**: [`DimensionCalculator`] strategies (pure, unit testable)
//! - **Parameters**: [`Quality`] and [`EncodeOptions`]
//! - **Backend**: [`RasterBackend`] trait + [`RustBackend`]
//! - **Operations**: [`Transform`], one decode → encode run with guaranteed cleanup

pub mod backend;
pub mod calculations;
pub mod operations;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, RasterBackend, RawImage};
pub use calculations::DimensionCalculator;
pub use operations::Transform;
pub use params::{EncodeOptions, Quality};
pub use rust_backend::RustBackend;
