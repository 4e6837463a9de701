//! Row-parallel convolution using Rayon.
//!
//! Same arithmetic as [`crate::convolve`], with output rows distributed over
//! the rayon pool. Both paths share the per-row inner loop, so the results
//! are bit-identical.
//!
//! # Example
//!
//! ```rust
//! use bandblur_filter::{parallel, Kernel};
//!
//! let src = vec![128u8; 64 * 64 * 3];
//! let kernel = Kernel::gaussian(1.0).unwrap();
//! let dst = parallel::convolve(&src, 64, 64, 3, &kernel).unwrap();
//! ```

use crate::convolve::{check_dims, convolve_row};
use crate::{FilterResult, Kernel};
use rayon::prelude::*;

/// Row-parallel convolution. See [`crate::convolve`] for the semantics.
///
/// # Errors
///
/// Same validation as the serial path.
pub fn convolve(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> FilterResult<Vec<u8>> {
    check_dims(src, width, height, channels)?;

    let mut dst = vec![0u8; src.len()];
    dst.par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            convolve_row(src, width, height, channels, kernel, y, row);
        });
    Ok(dst)
}
