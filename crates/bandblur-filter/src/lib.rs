//! # bandblur-filter
//!
//! Gaussian kernel generation and 2-D convolution over byte rasters.
//!
//! This crate is the numeric half of bandblur: it knows nothing about bands,
//! workers or canvases, only about kernels and flat `&[u8]` pixel buffers.
//! The band pipeline injects it at the worker seam.
//!
//! # Modules
//!
//! - [`kernel`] - Kernel construction ([`Kernel::gaussian`], [`Kernel::identity`])
//! - [`convolve`] - Single-threaded convolution
//! - [`parallel`] - Row-parallel convolution via rayon (feature `parallel`, on
//!   by default)
//!
//! # Example
//!
//! ```rust
//! use bandblur_filter::{convolve, Kernel};
//!
//! let kernel = Kernel::gaussian(1.0).unwrap();
//! assert_eq!(kernel.dim(), 7); // origin = 3 * sigma
//!
//! let src = vec![128u8; 16 * 16 * 3];
//! let dst = convolve(&src, 16, 16, 3, &kernel).unwrap();
//! assert_eq!(dst, src); // constant image is a fixed point
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod convolve;
mod error;
pub mod kernel;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use convolve::convolve;
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
