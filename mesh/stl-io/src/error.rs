//! Error types for STL decoding and file access.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for file-level STL operations.
pub type IoResult<T> = Result<T, IoError>;

/// Malformed binary STL input.
///
/// These are the only ways a byte buffer can fail to decode: the format
/// has no checksums or markers beyond its length and facet count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer too short to hold the header and facet count.
    #[error("truncated STL header: expected at least 84 bytes, got {actual}")]
    TruncatedHeader {
        /// Length of the buffer.
        actual: usize,
    },

    /// Buffer length does not match the declared facet count.
    ///
    /// `actual < expected` for a cut-off file; `actual > expected` when
    /// trailing bytes follow the last facet and are not allowed.
    #[error("STL body length mismatch: expected {expected} bytes, got {actual}")]
    TruncatedBody {
        /// Length implied by the facet count.
        expected: usize,
        /// Length of the buffer.
        actual: usize,
    },

    /// Declared facet count is above the configured ceiling or cannot be
    /// sized without overflow.
    #[error("invalid STL facet count: {count}")]
    InvalidCount {
        /// Count read from bytes 80..84.
        count: u32,
    },
}

/// Errors that can occur when reading or writing STL files.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Library root is missing or not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// Configured root.
        path: PathBuf,
    },

    /// Model name cannot be used as a file name inside the library.
    #[error("invalid model name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// File content is not a valid binary STL.
    #[error("{path}: {source}")]
    Decode {
        /// File that failed to decode.
        path: PathBuf,
        /// What was wrong with it.
        source: DecodeError,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Map an open/read failure on `path`, turning `NotFound` into
    /// [`IoError::FileNotFound`].
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }

    /// The decode error behind this failure, if any.
    #[must_use]
    pub const fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
