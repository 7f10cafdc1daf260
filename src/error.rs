//! Error types for the crate boundary
//!
//! The per-frame core never fails; these cover loading configuration and
//! wrapping externally decoded pixel data.

use std::path::PathBuf;

/// Failure loading or validating settings / catalog files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure wrapping a raw byte buffer as a raster
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("expected {expected} bytes for {width}x{height}x{channels}, got {actual}")]
    SizeMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },
}
