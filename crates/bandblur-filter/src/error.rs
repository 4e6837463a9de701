//! Error types for kernel and convolution operations.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Standard deviation is not a positive finite number.
    #[error("invalid standard deviation: {0} (must be finite and > 0)")]
    InvalidSigma(f32),

    /// Kernel dimension is zero or even.
    #[error("invalid kernel dimension: {0} (must be odd and > 0)")]
    InvalidKernelDim(usize),

    /// Buffer length doesn't match the stated dimensions.
    #[error("size mismatch: expected {expected} bytes for {width}x{height}x{channels}, got {got}")]
    SizeMismatch {
        /// Expected buffer length
        expected: usize,
        /// Actual buffer length
        got: usize,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
        /// Bytes per pixel
        channels: usize,
    },

    /// Width, height or channel count is zero.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
