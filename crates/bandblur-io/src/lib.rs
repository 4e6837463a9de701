//! # bandblur-io
//!
//! BMP image I/O for the bandblur pipeline.
//!
//! Reads and writes uncompressed Windows bitmaps (`BITMAPINFOHEADER`,
//! `BI_RGB`) at 8, 24 and 32 bits per pixel, converting between the on-disk
//! representation (bottom-up rows, 4-byte row padding, palette for 8-bit)
//! and the packed top-down [`Canvas`](bandblur_core::Canvas) the pipeline
//! works on.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bandblur_io::bmp;
//!
//! let canvas = bmp::read("input.bmp")?;
//! bmp::write("output.bmp", &canvas)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bmp;
mod error;

pub use error::{IoError, IoResult};
