//! Convolution kernel construction.
//!
//! A [`Kernel`] is a square, odd-sized weight matrix. [`Kernel::gaussian`]
//! sizes the matrix from the standard deviation alone: the radius (`origin`)
//! is three sigma, which keeps ~99.7% of the distribution's mass inside the
//! kernel, and the dimension is `2 * origin + 1`.
//!
//! # Example
//!
//! ```rust
//! use bandblur_filter::Kernel;
//!
//! let k = Kernel::gaussian(1.5).unwrap();
//! assert_eq!(k.origin(), 4);
//! assert_eq!(k.dim(), 9);
//! ```

use crate::{FilterError, FilterResult};

/// Radius of the kernel in standard deviations.
const SIGMA_SPAN: f32 = 3.0;

/// Square convolution kernel with odd dimension.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Row-major weights, `dim * dim` entries.
    data: Vec<f32>,
    /// Kernel width and height (odd).
    dim: usize,
    /// Center offset, `dim / 2`. Also the blur radius in pixels.
    origin: usize,
}

impl Kernel {
    /// Creates a kernel from raw weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelDim`] for an even or zero `dim`,
    /// and [`FilterError::InvalidDimensions`] if `data` is not `dim * dim`
    /// entries.
    pub fn new(data: Vec<f32>, dim: usize) -> FilterResult<Self> {
        if dim == 0 || dim % 2 == 0 {
            return Err(FilterError::InvalidKernelDim(dim));
        }
        if data.len() != dim * dim {
            return Err(FilterError::InvalidDimensions(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                dim,
                dim
            )));
        }
        Ok(Self {
            data,
            dim,
            origin: dim / 2,
        })
    }

    /// Creates a normalized Gaussian kernel sized from `sigma`.
    ///
    /// The radius is `floor(3 * sigma)` and the dimension `2 * radius + 1`.
    /// Weights follow `exp(-(x^2 + y^2) / (2 * sigma^2))` and are normalized
    /// to sum to 1. A sigma below 1/3 yields a 1x1 identity kernel.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSigma`] unless `sigma` is finite and
    /// strictly positive.
    pub fn gaussian(sigma: f32) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidSigma(sigma));
        }
        let origin = (SIGMA_SPAN * sigma) as usize;
        let dim = 2 * origin + 1;
        let sigma2 = 2.0 * sigma * sigma;

        let mut data = Vec::with_capacity(dim * dim);
        let mut sum = 0.0f32;
        let half = origin as i32;
        for y in -half..=half {
            for x in -half..=half {
                let d = (x * x + y * y) as f32;
                let w = (-d / sigma2).exp();
                data.push(w);
                sum += w;
            }
        }
        for w in &mut data {
            *w /= sum;
        }

        Ok(Self { data, dim, origin })
    }

    /// Creates an identity kernel: 1 at the center, 0 elsewhere.
    ///
    /// Convolving with it reproduces the input exactly, which makes it the
    /// reference filter for reassembly tests.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelDim`] for an even or zero `dim`.
    pub fn identity(dim: usize) -> FilterResult<Self> {
        if dim == 0 || dim % 2 == 0 {
            return Err(FilterError::InvalidKernelDim(dim));
        }
        let mut data = vec![0.0f32; dim * dim];
        data[(dim / 2) * dim + dim / 2] = 1.0;
        Ok(Self {
            data,
            dim,
            origin: dim / 2,
        })
    }

    /// Returns the kernel weights in row-major order.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the kernel dimension (width and height).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the center offset, which is also the blur radius in pixels.
    #[inline]
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Returns the weight at kernel position (kx, ky).
    #[inline]
    pub(crate) fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.data[ky * self.dim + kx]
    }
}
