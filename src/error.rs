//! Error types for the event sorter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for event sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the event sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Failed to parse timestamp from {source_info}: {message}")]
    TimestampParse { source_info: String, message: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to copy {source_path} to {dest}: {message}")]
    Copy {
        source_path: PathBuf,
        dest: PathBuf,
        message: String,
    },
}
