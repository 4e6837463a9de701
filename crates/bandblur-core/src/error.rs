//! Error types for core raster operations.
//!
//! The [`Error`] enum covers the failure modes of [`crate::canvas::Canvas`]
//! construction and access: bad dimensions, unsupported color depths,
//! mismatched buffer sizes, and out-of-range pixel or row addressing.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during canvas operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the buffer size would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why the dimensions are invalid
        reason: String,
    },

    /// Color depth is not a supported bits-per-pixel value.
    #[error("unsupported color depth: {0} bits per pixel")]
    UnsupportedDepth(u16),

    /// Provided pixel buffer doesn't match the canvas dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSize {
        /// Expected buffer length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        got: usize,
    },

    /// Pixel coordinates are outside canvas bounds.
    #[error("pixel ({x}, {y}) out of bounds for canvas {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Canvas width
        width: u32,
        /// Canvas height
        height: u32,
    },

    /// Row range extends beyond the canvas height.
    #[error("row range [{start}, {end}) exceeds canvas height {height}")]
    RowRange {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Canvas height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::RowRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_buffer_size_message() {
        let err = Error::BufferSize {
            expected: 300,
            got: 299,
        };
        assert!(err.to_string().contains("300"));
        assert!(!err.is_bounds_error());
    }
}
