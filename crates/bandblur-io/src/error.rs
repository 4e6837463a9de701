//! Error types for BMP I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or corrupted file.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Compression method this codec doesn't handle.
    #[error("unsupported compression: {0} (only BI_RGB is supported)")]
    UnsupportedCompression(u32),

    /// Bit depth this codec doesn't handle.
    #[error("unsupported bit depth: {0} bits per pixel")]
    UnsupportedBitDepth(u16),

    /// File ended before the pixel data did.
    #[error("truncated file: expected {expected} more bytes of pixel data")]
    Truncated {
        /// Bytes still expected when the stream ended
        expected: usize,
    },

    /// Canvas construction error.
    #[error(transparent)]
    Core(#[from] bandblur_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
