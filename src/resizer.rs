//! The resize orchestrator.
//!
//! A [`Resizer`] holds a [`BoundsConfig`], a backend, the selected strategy
//! and the accumulated transformation and option sets. Every setter
//! validates before it stores anything, so a rejected call leaves the
//! resizer exactly as it was.
//!
//! ```no_run
//! use image_resizer::{BoundsConfig, Resizer, ResizeStrategy, Transformation};
//! use image_resizer::imaging::RustBackend;
//! use std::path::Path;
//!
//! let mut resizer = Resizer::new(BoundsConfig::safe(), RustBackend::new());
//! resizer
//!     .set_strategy(ResizeStrategy::FixedWidth)
//!     .set_transformation(Transformation::SetWidth, 200)?;
//! let outcome = resizer.resize(Path::new("photo.jpg"), None)?;
//! println!("{} -> {}", outcome.source.display(), outcome.target.display());
//! # Ok::<(), image_resizer::ResizeError>(())
//! ```
//!
//! ## Resize sequence
//!
//! 1. Validate the source file.
//! 2. Resolve the target (`resized-<name>` next to the source when none is
//!    given) and validate its directory if the target does not exist yet.
//! 3. Probe the original dimensions.
//! 4. Build the dimension calculator from the strategy and transformations.
//! 5. Compute the resolved dimensions.
//! 6. Resolve output options and run the [`Transform`].

use crate::config::BoundsConfig;
use crate::error::{ResizeError, Result};
use crate::imaging::{
    DimensionCalculator, Dimensions, EncodeOptions, RasterBackend, RustBackend, Transform,
};
use crate::types::{
    ImageFormat, OptionKey, Options, ResizeStrategy, SUPPORTED_EXTENSIONS, ScaleFilter,
    Transformation, Transformations, extension_of,
};
use crate::validators::{Validator, ValidatorKind};
use crate::value::Value;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Prefix for targets derived from the source name.
pub const DEFAULT_TARGET_PREFIX: &str = "resized-";

/// What a successful resize produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeOutcome {
    pub source: PathBuf,
    pub target: PathBuf,
    pub format: ImageFormat,
    pub original: Dimensions,
    pub resized: Dimensions,
    pub quality: u32,
    pub interlace: bool,
    pub filter: ScaleFilter,
}

#[derive(Debug)]
pub struct Resizer<B: RasterBackend = RustBackend> {
    config: BoundsConfig,
    backend: B,
    strategy: ResizeStrategy,
    transformations: Transformations,
    options: Options,
}

impl Resizer<RustBackend> {
    /// Default bounds and the `image`-crate backend.
    pub fn with_defaults() -> Self {
        Self::new(BoundsConfig::default(), RustBackend::new())
    }
}

impl<B: RasterBackend> Resizer<B> {
    pub fn new(config: BoundsConfig, backend: B) -> Self {
        Self {
            config,
            backend,
            strategy: ResizeStrategy::default(),
            transformations: Transformations::new(),
            options: Options::new(),
        }
    }

    pub fn config(&self) -> &BoundsConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn strategy(&self) -> ResizeStrategy {
        self.strategy
    }

    pub fn transformations(&self) -> &Transformations {
        &self.transformations
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn validate(&self, kind: ValidatorKind, value: &Value) -> Result<()> {
        Validator::new(kind, &self.config).validate(value)
    }

    pub fn set_strategy(&mut self, strategy: ResizeStrategy) -> &mut Self {
        self.strategy = strategy;
        self
    }

    pub fn set_transformation(
        &mut self,
        key: Transformation,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let value = value.into();
        self.validate(key.validator(), &value)?;
        self.transformations.insert(key, value);
        Ok(self)
    }

    /// Validate every entry, then replace the whole set.
    pub fn set_transformations(&mut self, transformations: Transformations) -> Result<&mut Self> {
        for (key, value) in &transformations {
            self.validate(key.validator(), value)?;
        }
        self.transformations = transformations;
        Ok(self)
    }

    pub fn set_option(&mut self, key: OptionKey, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        self.validate(key.validator(), &value)?;
        self.options.insert(key, value);
        Ok(self)
    }

    /// Validate every entry, then replace the whole set.
    pub fn set_options(&mut self, options: Options) -> Result<&mut Self> {
        for (key, value) in &options {
            self.validate(key.validator(), value)?;
        }
        self.options = options;
        Ok(self)
    }

    /// Resize `source` into `target`, or into `resized-<name>` next to it.
    pub fn resize(&self, source: &Path, target: Option<&Path>) -> Result<ResizeOutcome> {
        self.validate(ValidatorKind::SourceFile, &Value::from(source))?;
        let format = ImageFormat::from_path(source).ok_or_else(|| ResizeError::FormatUnsupported {
            path: source.to_path_buf(),
            extension: extension_of(source).unwrap_or_default().to_string(),
            supported: SUPPORTED_EXTENSIONS.to_vec(),
        })?;

        let target = match target {
            Some(t) => t.to_path_buf(),
            None => default_target(source),
        };
        if !target.exists() {
            self.validate(ValidatorKind::TargetDir, &Value::from(target_dir(&target)))?;
        }

        let original = self
            .backend
            .probe(source)
            .map_err(|e| ResizeError::ProbeFailed {
                path: source.to_path_buf(),
                source: e,
            })?;
        tracing::debug!(source = %source.display(), height = original.height, width = original.width, "probed");

        let calculator = DimensionCalculator::new(self.strategy, &self.transformations)?;
        let resized = calculator.calculate(original);
        tracing::debug!(strategy = %self.strategy, height = resized.height, width = resized.width, "resolved dimensions");

        let options = EncodeOptions::resolve(&self.options, &self.config);
        Transform::new(&self.backend, source, &target, format, resized, options).run()?;

        tracing::info!(
            source = %source.display(),
            output = %target.display(),
            "resized {}x{} to {}x{}",
            original.width,
            original.height,
            resized.width,
            resized.height
        );
        Ok(ResizeOutcome {
            source: source.to_path_buf(),
            target,
            format,
            original,
            resized,
            quality: options.quality.value(),
            interlace: options.interlace,
            filter: options.filter,
        })
    }

    /// Resize every source in parallel, each into its derived target.
    ///
    /// Results are in input order.
    pub fn resize_all(&self, sources: &[PathBuf]) -> Vec<(PathBuf, Result<ResizeOutcome>)> {
        sources
            .par_iter()
            .map(|source| (source.clone(), self.resize(source, None)))
            .collect()
    }
}

/// `<dir>/resized-<file name>`.
pub fn default_target(source: &Path) -> PathBuf {
    let name = source.file_name().unwrap_or_default().to_string_lossy();
    source.with_file_name(format!("{DEFAULT_TARGET_PREFIX}{name}"))
}

/// Directory a target will be written into; a bare file name means the working directory.
fn target_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
