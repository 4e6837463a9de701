//! Single-threaded 2-D convolution over byte rasters.

use crate::{FilterError, FilterResult, Kernel};
use tracing::trace;

/// Validates buffer dimensions shared by the serial and parallel paths.
pub(crate) fn check_dims(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> FilterResult<()> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(FilterError::InvalidDimensions(
            "width, height and channels must be > 0".into(),
        ));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| FilterError::InvalidDimensions("image dimensions overflow".into()))?;
    if src.len() != expected {
        return Err(FilterError::SizeMismatch {
            expected,
            got: src.len(),
            width,
            height,
            channels,
        });
    }
    Ok(())
}

/// Convolves one output row. Shared by the serial and parallel paths so both
/// produce bit-identical results.
pub(crate) fn convolve_row(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
    y: usize,
    row: &mut [u8],
) {
    let r = kernel.origin() as isize;
    for x in 0..width {
        for c in 0..channels {
            let mut sum = 0.0f32;
            for ky in 0..kernel.dim() {
                // Clamp-to-edge sampling at the raster borders
                let sy = (y as isize + ky as isize - r).clamp(0, height as isize - 1) as usize;
                for kx in 0..kernel.dim() {
                    let sx = (x as isize + kx as isize - r).clamp(0, width as isize - 1) as usize;
                    let v = src[(sy * width + sx) * channels + c] as f32;
                    sum += v * kernel.weight(kx, ky);
                }
            }
            row[x * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Convolves a byte raster with a kernel, clamping samples at the borders.
///
/// `channels` is the number of bytes per pixel; each byte is filtered as an
/// independent channel. The output buffer has the same shape as the input.
///
/// # Errors
///
/// Returns [`FilterError::SizeMismatch`] if `src` is not
/// `width * height * channels` bytes, or [`FilterError::InvalidDimensions`]
/// for zero sizes.
///
/// # Example
///
/// ```rust
/// use bandblur_filter::{convolve, Kernel};
///
/// let src = vec![100u8; 8 * 8 * 3];
/// let kernel = Kernel::gaussian(0.5).unwrap();
/// let dst = convolve(&src, 8, 8, 3, &kernel).unwrap();
/// assert_eq!(dst.len(), src.len());
/// ```
pub fn convolve(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> FilterResult<Vec<u8>> {
    check_dims(src, width, height, channels)?;
    trace!(width, height, channels, dim = kernel.dim(), "convolve");

    let mut dst = vec![0u8; src.len()];
    for (y, row) in dst.chunks_exact_mut(width * channels).enumerate() {
        convolve_row(src, width, height, channels, kernel, y, row);
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_image_fixed_point() {
        let src = vec![77u8; 16 * 16 * 3];
        let k = Kernel::gaussian(1.0).unwrap();
        let dst = convolve(&src, 16, 16, 3, &k).unwrap();
        for &v in &dst {
            assert!((v as i16 - 77).abs() <= 1);
        }
    }

    #[test]
    fn test_identity_kernel_roundtrip() {
        let src: Vec<u8> = (0..12 * 9 * 3).map(|i| (i % 251) as u8).collect();
        let k = Kernel::identity(5).unwrap();
        let dst = convolve(&src, 12, 9, 3, &k).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_blur_spreads_impulse() {
        let mut src = vec![0u8; 9 * 9];
        src[4 * 9 + 4] = 255;
        let k = Kernel::gaussian(1.0).unwrap();
        let dst = convolve(&src, 9, 9, 1, &k).unwrap();
        // Center keeps the most mass, neighbors pick some up
        assert!(dst[4 * 9 + 4] > dst[4 * 9 + 5]);
        assert!(dst[4 * 9 + 5] > 0);
    }

    #[test]
    fn test_size_mismatch() {
        let src = vec![0u8; 10];
        let k = Kernel::identity(3).unwrap();
        assert!(matches!(
            convolve(&src, 4, 4, 3, &k),
            Err(FilterError::SizeMismatch { expected: 48, .. })
        ));
    }

    #[test]
    fn test_zero_dims_rejected() {
        let k = Kernel::identity(3).unwrap();
        assert!(convolve(&[], 0, 4, 3, &k).is_err());
        assert!(convolve(&[], 4, 4, 0, &k).is_err());
    }
}
