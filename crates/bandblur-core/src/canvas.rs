//! Canvas buffer type for banded image processing.
//!
//! A [`Canvas`] is an owned raster: width, height, color depth, and a packed
//! pixel buffer of exactly `row_bytes * height` bytes. Two canvases exist per
//! blur run: the source (read once, immutable) and the output (written
//! incrementally, one band at a time, by the reassembler).
//!
//! # Memory Layout
//!
//! Rows are stored top-to-bottom with no padding:
//!
//! ```text
//! Memory: [B G R B G R B G R ...]  <- Row 0
//!         [B G R B G R B G R ...]  <- Row 1
//!         ...
//! ```
//!
//! Within a pixel the byte order is whatever the codec that produced the
//! canvas uses (the BMP codec yields BGR). The band pipeline copies whole
//! rows and never interprets pixel bytes; only [`Canvas::get_pixel_rgb`] and
//! [`Canvas::set_pixel_rgb`] assume the BGR convention.
//!
//! # Usage
//!
//! ```rust
//! use bandblur_core::Canvas;
//!
//! let mut canvas = Canvas::new(50, 100, 24).unwrap();
//! canvas.set_pixel_rgb(10, 20, 255, 128, 0).unwrap();
//! assert_eq!(canvas.get_pixel_rgb(10, 20).unwrap(), (255, 128, 0));
//! ```

use crate::{Error, Result};
use std::ops::Range;

/// Color depths a [`Canvas`] accepts, in bits per pixel.
const SUPPORTED_DEPTHS: [u16; 3] = [8, 24, 32];

/// Owned raster buffer with packed rows.
///
/// See the [module documentation](self) for the memory layout.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Canvas width in pixels
    width: u32,
    /// Canvas height in pixels
    height: u32,
    /// Color depth in bits per pixel (8, 24 or 32)
    depth: u16,
    /// Packed pixel data, `row_bytes * height` bytes
    data: Vec<u8>,
}

impl Canvas {
    /// Creates a new zero-filled canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero width/height or a buffer
    /// size that would overflow, and [`Error::UnsupportedDepth`] for a depth
    /// other than 8, 24 or 32 bits per pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bandblur_core::Canvas;
    ///
    /// let canvas = Canvas::new(1920, 1080, 24).unwrap();
    /// assert_eq!(canvas.row_bytes(), 1920 * 3);
    /// ```
    pub fn new(width: u32, height: u32, depth: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be > 0",
            ));
        }
        if !SUPPORTED_DEPTHS.contains(&depth) {
            return Err(Error::UnsupportedDepth(depth));
        }
        let row_bytes = width as usize * (depth / 8) as usize;
        let size = row_bytes
            .checked_mul(height as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflow"))?;
        Ok(Self {
            width,
            height,
            depth,
            data: vec![0u8; size],
        })
    }

    /// Creates a canvas from an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data` is not exactly
    /// `row_bytes * height` bytes, plus the [`Canvas::new`] validation errors.
    pub fn from_data(width: u32, height: u32, depth: u16, data: Vec<u8>) -> Result<Self> {
        let mut canvas = Self::new(width, height, depth)?;
        if data.len() != canvas.data.len() {
            return Err(Error::BufferSize {
                expected: canvas.data.len(),
                got: data.len(),
            });
        }
        canvas.data = data;
        Ok(canvas)
    }

    /// Returns the canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the color depth in bits per pixel.
    #[inline]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Returns the number of bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        (self.depth / 8) as usize
    }

    /// Returns the number of bytes per row (no padding).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Returns the total pixel buffer size in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raw pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the canvas and returns its pixel buffer.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns row `y` as a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowRange`] if `y >= height`.
    pub fn row(&self, y: usize) -> Result<&[u8]> {
        self.rows(y..y + 1)
    }

    /// Returns a mutable slice of row `y`.
    pub fn row_mut(&mut self, y: usize) -> Result<&mut [u8]> {
        self.rows_mut(y..y + 1)
    }

    /// Returns the contiguous byte range covering rows `[start, end)`.
    ///
    /// The band partitioner uses this to carve tiles out of the source
    /// without interpreting pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowRange`] if the range exceeds the canvas height or
    /// is inverted.
    pub fn rows(&self, range: Range<usize>) -> Result<&[u8]> {
        self.check_rows(&range)?;
        let rb = self.row_bytes();
        Ok(&self.data[range.start * rb..range.end * rb])
    }

    /// Returns the mutable byte range covering rows `[start, end)`.
    pub fn rows_mut(&mut self, range: Range<usize>) -> Result<&mut [u8]> {
        self.check_rows(&range)?;
        let rb = self.row_bytes();
        Ok(&mut self.data[range.start * rb..range.end * rb])
    }

    fn check_rows(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.height as usize {
            return Err(Error::RowRange {
                start: range.start,
                end: range.end,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Returns the byte offset of pixel (x, y).
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.row_bytes() + x as usize * self.bytes_per_pixel()
    }

    /// Reads the pixel at (x, y) as an (r, g, b) triple.
    ///
    /// Assumes the BGR byte convention used by the BMP codec. For 8-bit
    /// canvases the single gray byte is returned for all three components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if (x, y) is outside the canvas.
    pub fn get_pixel_rgb(&self, x: u32, y: u32) -> Result<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let off = self.pixel_offset(x, y);
        Ok(match self.depth {
            8 => {
                let v = self.data[off];
                (v, v, v)
            }
            _ => (self.data[off + 2], self.data[off + 1], self.data[off]),
        })
    }

    /// Writes the pixel at (x, y) from an (r, g, b) triple.
    ///
    /// For 8-bit canvases the red component is stored as the gray value.
    /// The alpha byte of 32-bit canvases is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if (x, y) is outside the canvas.
    pub fn set_pixel_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let off = self.pixel_offset(x, y);
        match self.depth {
            8 => self.data[off] = r,
            _ => {
                self.data[off] = b;
                self.data[off + 1] = g;
                self.data[off + 2] = r;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}
