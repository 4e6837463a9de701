//! # bandblur-core
//!
//! Core raster types for banded image processing.
//!
//! This crate provides the foundational types used throughout the bandblur
//! workspace:
//!
//! - [`Canvas`] - Owned byte-buffer raster with packed rows
//! - [`Error`] / [`Result`] - Unified error type for raster operations
//!
//! ## Crate Structure
//!
//! This crate is the foundation of bandblur and has no internal dependencies.
//! All other bandblur crates depend on `bandblur-core`:
//!
//! ```text
//! bandblur-core (this crate)
//!    ^
//!    |
//!    +-- bandblur-io (BMP codec)
//!    +-- bandblur-pipeline (partition / dispatch / collect / reassemble)
//!    +-- bandblur-cli (binary)
//! ```
//!
//! ## Memory Layout
//!
//! A [`Canvas`] stores pixels in **row-major** order, top-to-bottom, with no
//! row padding. `row_bytes = width * depth / 8`, and the buffer length is
//! always `row_bytes * height`. Pixel byte order within a pixel is whatever
//! the codec that produced the canvas uses (BMP files yield BGR); the band
//! pipeline treats pixels as opaque bytes and never depends on it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod canvas;
pub mod error;

pub use canvas::Canvas;
pub use error::{Error, Result};
