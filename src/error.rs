//! Failure taxonomy for validation, dimension resolution and the pixel step.
//!
//! Every variant carries enough context (field, offending value, bounds,
//! path) to build an actionable message without knowing pipeline internals.
//! [`ResizeError::kind`] collapses the variants onto the closed set of
//! [`ErrorKind`]s callers can branch on.

use crate::imaging::BackendError;
use crate::types::{ImageFormat, Transformation};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    WrongType,
    OutOfRange,
    OutOfSet,
    MissingParameter,
    PathNotFound,
    PathWrongKind,
    PathNotReadable,
    PathNotWritable,
    FormatUnsupported,
    FormatMismatch,
    DecodeFailed,
    EncodeFailed,
}

/// What a path was expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => f.write_str("file"),
            PathKind::Directory => f.write_str("directory"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("{field} must be a {expected}, got: {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{field} expected to be in [{min}, {max}]. Got {value}.")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} expected to be one of {allowed:?}. Got {value}.")]
    OutOfSet {
        field: String,
        value: i64,
        allowed: Vec<i64>,
    },
    #[error("missing transformation '{0}'")]
    MissingParameter(Transformation),
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("{} is not a {expected}", path.display())]
    PathWrongKind { path: PathBuf, expected: PathKind },
    #[error("path not readable: {}", .0.display())]
    PathNotReadable(PathBuf),
    #[error("path not writable: {}", .0.display())]
    PathNotWritable(PathBuf),
    #[error("unsupported image type '{extension}' for {}; supported: {}", path.display(), supported.join(", "))]
    FormatUnsupported {
        path: PathBuf,
        extension: String,
        supported: Vec<&'static str>,
    },
    #[error("{} has extension '{found}'. '{expected}' is expected.", path.display())]
    FormatMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },
    #[error("cannot read image size of {}: {source}", path.display())]
    ProbeFailed {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("cannot create {format} image from {}: {source}", path.display())]
    DecodeFailed {
        path: PathBuf,
        format: ImageFormat,
        #[source]
        source: BackendError,
    },
    #[error("cannot save image to {}: {source}", path.display())]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl ResizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResizeError::WrongType { .. } => ErrorKind::WrongType,
            ResizeError::OutOfRange { .. } => ErrorKind::OutOfRange,
            ResizeError::OutOfSet { .. } => ErrorKind::OutOfSet,
            ResizeError::MissingParameter(_) => ErrorKind::MissingParameter,
            ResizeError::PathNotFound(_) => ErrorKind::PathNotFound,
            ResizeError::PathWrongKind { .. } => ErrorKind::PathWrongKind,
            ResizeError::PathNotReadable(_) => ErrorKind::PathNotReadable,
            ResizeError::PathNotWritable(_) => ErrorKind::PathNotWritable,
            ResizeError::FormatUnsupported { .. } => ErrorKind::FormatUnsupported,
            ResizeError::FormatMismatch { .. } => ErrorKind::FormatMismatch,
            ResizeError::ProbeFailed { .. } | ResizeError::DecodeFailed { .. } => {
                ErrorKind::DecodeFailed
            }
            ResizeError::EncodeFailed { .. } => ErrorKind::EncodeFailed,
        }
    }

    pub(crate) fn wrong_type(field: impl Into<String>, expected: &'static str, found: &crate::Value) -> Self {
        ResizeError::WrongType {
            field: field.into(),
            expected,
            found: found.type_name(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_cites_bounds() {
        let err = ResizeError::OutOfRange {
            field: "width".into(),
            value: -5.0,
            min: 100.0,
            max: 4000.0,
        };
        assert_eq!(
            err.to_string(),
            "width expected to be in [100, 4000]. Got -5."
        );
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn probe_failure_is_a_decode_failure() {
        let err = ResizeError::ProbeFailed {
            path: "/a.png".into(),
            source: BackendError::ProcessingFailed("truncated".into()),
        };
        assert_eq!(err.kind(), ErrorKind::DecodeFailed);
        assert!(err.to_string().contains("/a.png"));
    }

    #[test]
    fn unsupported_format_lists_extensions() {
        let err = ResizeError::FormatUnsupported {
            path: "/a.bmp".into(),
            extension: "bmp".into(),
            supported: crate::types::SUPPORTED_EXTENSIONS.to_vec(),
        };
        assert!(err.to_string().ends_with("gif, jpeg, jpg, png"));
    }
}
