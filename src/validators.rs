//! Input validators.
//!
//! One variant per semantic field. Bounded variants copy their min/max out of
//! a [`BoundsConfig`] when built; the interlace, scale-filter and path
//! variants carry no state. Validation is a pure check: nothing is coerced,
//! nothing on disk is touched beyond reading metadata.
//!
//! | Kind | Accepts | Failure kinds |
//! |---|---|---|
//! | Width, Height, Quality | integer in config range | WrongType, OutOfRange |
//! | Ratio | integer or float in config range | WrongType, OutOfRange |
//! | Interlace | boolean | WrongType |
//! | ScaleFilter | integer filter code | WrongType, OutOfSet |
//! | SourceFile | readable file with a supported extension | WrongType, PathNotFound, PathWrongKind, PathNotReadable, FormatUnsupported |
//! | TargetDir | writable directory | WrongType, PathNotFound, PathWrongKind, PathNotWritable |

use crate::config::BoundsConfig;
use crate::error::{PathKind, ResizeError, Result};
use crate::types::{SUPPORTED_EXTENSIONS, ScaleFilter, extension_of};
use crate::value::Value;
use std::fs::Metadata;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    Width,
    Height,
    Ratio,
    Quality,
    Interlace,
    ScaleFilter,
    SourceFile,
    TargetDir,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validator {
    Width { min: u32, max: u32 },
    Height { min: u32, max: u32 },
    Ratio { min: f64, max: f64 },
    Quality { min: u32, max: u32 },
    Interlace,
    ScaleFilter,
    SourceFile,
    TargetDir,
}

impl Validator {
    pub fn new(kind: ValidatorKind, config: &BoundsConfig) -> Self {
        match kind {
            ValidatorKind::Width => Validator::Width {
                min: config.min_width(),
                max: config.max_width(),
            },
            ValidatorKind::Height => Validator::Height {
                min: config.min_height(),
                max: config.max_height(),
            },
            ValidatorKind::Ratio => Validator::Ratio {
                min: config.min_ratio(),
                max: config.max_ratio(),
            },
            ValidatorKind::Quality => Validator::Quality {
                min: config.min_quality(),
                max: config.max_quality(),
            },
            ValidatorKind::Interlace => Validator::Interlace,
            ValidatorKind::ScaleFilter => Validator::ScaleFilter,
            ValidatorKind::SourceFile => Validator::SourceFile,
            ValidatorKind::TargetDir => Validator::TargetDir,
        }
    }

    pub fn kind(&self) -> ValidatorKind {
        match self {
            Validator::Width { .. } => ValidatorKind::Width,
            Validator::Height { .. } => ValidatorKind::Height,
            Validator::Ratio { .. } => ValidatorKind::Ratio,
            Validator::Quality { .. } => ValidatorKind::Quality,
            Validator::Interlace => ValidatorKind::Interlace,
            Validator::ScaleFilter => ValidatorKind::ScaleFilter,
            Validator::SourceFile => ValidatorKind::SourceFile,
            Validator::TargetDir => ValidatorKind::TargetDir,
        }
    }

    /// Field name used in error messages.
    pub fn field(&self) -> &'static str {
        match self {
            Validator::Width { .. } => "width",
            Validator::Height { .. } => "height",
            Validator::Ratio { .. } => "ratio",
            Validator::Quality { .. } => "quality",
            Validator::Interlace => "interlace",
            Validator::ScaleFilter => "scale mode",
            Validator::SourceFile => "source file",
            Validator::TargetDir => "target dir",
        }
    }

    pub fn validate(&self, value: &Value) -> Result<()> {
        let field = self.field();
        match *self {
            Validator::Width { min, max }
            | Validator::Height { min, max }
            | Validator::Quality { min, max } => validate_int_range(field, value, min, max),
            Validator::Ratio { min, max } => {
                let ratio = value
                    .as_number()
                    .ok_or_else(|| ResizeError::wrong_type(field, "float", value))?;
                if !(min..=max).contains(&ratio) {
                    return Err(ResizeError::OutOfRange {
                        field: field.into(),
                        value: ratio,
                        min,
                        max,
                    });
                }
                Ok(())
            }
            Validator::Interlace => match value {
                Value::Bool(_) => Ok(()),
                other => Err(ResizeError::wrong_type(field, "boolean", other)),
            },
            Validator::ScaleFilter => {
                let code = value
                    .as_int()
                    .ok_or_else(|| ResizeError::wrong_type(field, "integer", value))?;
                if ScaleFilter::from_code(code).is_none() {
                    return Err(ResizeError::OutOfSet {
                        field: field.into(),
                        value: code,
                        allowed: ScaleFilter::allowed_codes(),
                    });
                }
                Ok(())
            }
            Validator::SourceFile => {
                let path = value
                    .as_path()
                    .ok_or_else(|| ResizeError::wrong_type("Source file", "Path", value))?;
                validate_source_file(path)
            }
            Validator::TargetDir => {
                let path = value
                    .as_path()
                    .ok_or_else(|| ResizeError::wrong_type("Target dir", "Path", value))?;
                validate_target_dir(path)
            }
        }
    }
}

fn validate_int_range(field: &str, value: &Value, min: u32, max: u32) -> Result<()> {
    let v = value
        .as_int()
        .ok_or_else(|| ResizeError::wrong_type(field, "integer", value))?;
    if v < i64::from(min) || v > i64::from(max) {
        return Err(ResizeError::OutOfRange {
            field: field.into(),
            value: v as f64,
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(())
}

fn validate_source_file(path: &Path) -> Result<()> {
    let meta = existing_metadata(path)?;
    if !meta.is_file() {
        return Err(ResizeError::PathWrongKind {
            path: path.to_path_buf(),
            expected: PathKind::File,
        });
    }
    if !is_readable(&meta) {
        return Err(ResizeError::PathNotReadable(path.to_path_buf()));
    }
    match extension_of(path) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => Ok(()),
        ext => Err(ResizeError::FormatUnsupported {
            path: path.to_path_buf(),
            extension: ext.unwrap_or_default().to_string(),
            supported: SUPPORTED_EXTENSIONS.to_vec(),
        }),
    }
}

fn validate_target_dir(path: &Path) -> Result<()> {
    let meta = existing_metadata(path)?;
    if !meta.is_dir() {
        return Err(ResizeError::PathWrongKind {
            path: path.to_path_buf(),
            expected: PathKind::Directory,
        });
    }
    if !is_writable(&meta) {
        return Err(ResizeError::PathNotWritable(path.to_path_buf()));
    }
    Ok(())
}

fn existing_metadata(path: &Path) -> Result<Metadata> {
    std::fs::metadata(path).map_err(|_| ResizeError::PathNotFound(path.to_path_buf()))
}

#[cfg(unix)]
pub(crate) fn is_readable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o444 != 0
}

#[cfg(not(unix))]
pub(crate) fn is_readable(_meta: &Metadata) -> bool {
    true
}

pub(crate) fn is_writable(meta: &Metadata) -> bool {
    !meta.permissions().readonly()
}
