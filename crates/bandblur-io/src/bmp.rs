//! BMP (Windows bitmap) format support.
//!
//! The classic uncompressed raster container: 14-byte file header, 40-byte
//! `BITMAPINFOHEADER`, optional palette, then pixel rows. Only `BI_RGB`
//! (uncompressed) data at 8, 24 or 32 bits per pixel is handled, which covers
//! everything the blur pipeline produces or consumes.
//!
//! # Format Details
//!
//! - Magic: `BM`, little-endian fields throughout
//! - Rows are stored bottom-up when the height field is positive (the common
//!   case) and top-down when it is negative
//! - Each on-disk row is padded to a 4-byte boundary; [`Canvas`] rows are
//!   packed, so padding is added/stripped at this boundary
//! - 8-bit files carry a 256-entry BGRX palette; indices are resolved to gray
//!   on read and a grayscale palette is emitted on write
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bandblur_io::bmp;
//!
//! let canvas = bmp::read("frame.bmp")?;
//! bmp::write("out.bmp", &canvas)?;
//! ```

use crate::{IoError, IoResult};
use bandblur_core::Canvas;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

/// BMP magic: "BM" as a little-endian u16.
const MAGIC: u16 = 0x4D42;
/// File header size in bytes.
const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER size in bytes.
const INFO_HEADER_SIZE: u32 = 40;
/// Uncompressed pixel data.
const BI_RGB: u32 = 0;
/// Palette entries in an 8-bit file.
const PALETTE_ENTRIES: usize = 256;

/// Rounds a packed row length up to the BMP 4-byte boundary.
#[inline]
fn padded_row_bytes(row_bytes: usize) -> usize {
    (row_bytes + 3) & !3
}

/// Reads a BMP file into a [`Canvas`].
///
/// # Errors
///
/// Returns [`IoError::InvalidFile`] for bad magic or malformed headers,
/// [`IoError::UnsupportedCompression`] / [`IoError::UnsupportedBitDepth`] for
/// files outside the `BI_RGB` 8/24/32-bit envelope, and [`IoError::Io`] for
/// underlying read failures.
pub fn read(path: impl AsRef<Path>) -> IoResult<Canvas> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading BMP");
    let file = File::open(path)?;
    decode(BufReader::new(file))
}

/// Writes a [`Canvas`] to a BMP file, creating or truncating it.
///
/// # Errors
///
/// Returns [`IoError::Io`] for underlying write failures.
pub fn write(path: impl AsRef<Path>, canvas: &Canvas) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), width = canvas.width(), height = canvas.height(), "writing BMP");
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    encode(&mut w, canvas)?;
    w.flush()?;
    Ok(())
}

/// Decodes a BMP stream into a [`Canvas`].
pub fn decode(mut r: impl Read) -> IoResult<Canvas> {
    // --- file header ---
    let magic = r.read_u16::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(IoError::InvalidFile(format!(
            "bad magic 0x{magic:04X}, expected \"BM\""
        )));
    }
    let _file_size = r.read_u32::<LittleEndian>()?;
    let _reserved = r.read_u32::<LittleEndian>()?;
    let data_offset = r.read_u32::<LittleEndian>()?;

    // --- info header ---
    let header_size = r.read_u32::<LittleEndian>()?;
    if header_size < INFO_HEADER_SIZE {
        return Err(IoError::InvalidFile(format!(
            "info header too small: {header_size} bytes"
        )));
    }
    let width = r.read_i32::<LittleEndian>()?;
    let raw_height = r.read_i32::<LittleEndian>()?;
    let planes = r.read_u16::<LittleEndian>()?;
    let depth = r.read_u16::<LittleEndian>()?;
    let compression = r.read_u32::<LittleEndian>()?;
    let _image_size = r.read_u32::<LittleEndian>()?;
    let _x_ppm = r.read_i32::<LittleEndian>()?;
    let _y_ppm = r.read_i32::<LittleEndian>()?;
    let _colors_used = r.read_u32::<LittleEndian>()?;
    let _colors_important = r.read_u32::<LittleEndian>()?;

    if planes != 1 {
        return Err(IoError::InvalidFile(format!("plane count {planes}")));
    }
    if compression != BI_RGB {
        return Err(IoError::UnsupportedCompression(compression));
    }
    if !matches!(depth, 8 | 24 | 32) {
        return Err(IoError::UnsupportedBitDepth(depth));
    }
    if width <= 0 || raw_height == 0 {
        return Err(IoError::InvalidFile(format!(
            "non-positive dimensions {width}x{raw_height}"
        )));
    }
    // Positive height means bottom-up row order
    let bottom_up = raw_height > 0;
    let height = raw_height.unsigned_abs();
    let width = width as u32;
    trace!(width, height, depth, bottom_up, "BMP header");

    // Skip any extended header fields, then read the palette if present
    let mut consumed = FILE_HEADER_SIZE + header_size;
    for _ in INFO_HEADER_SIZE..header_size {
        r.read_u8()?;
    }
    let palette = if depth == 8 {
        let mut entries = [0u8; PALETTE_ENTRIES];
        for entry in entries.iter_mut() {
            // BGRX entry; 8-bit blur sources are grayscale so B == G == R
            let b = r.read_u8()?;
            let _g = r.read_u8()?;
            let _r = r.read_u8()?;
            let _x = r.read_u8()?;
            *entry = b;
            consumed += 4;
        }
        Some(entries)
    } else {
        None
    };

    // Skip any gap between the headers and the pixel array
    if data_offset > consumed {
        for _ in consumed..data_offset {
            r.read_u8()?;
        }
    }

    let mut canvas = Canvas::new(width, height, depth)?;
    let row_bytes = canvas.row_bytes();
    let pad = padded_row_bytes(row_bytes) - row_bytes;

    for i in 0..height as usize {
        let y = if bottom_up { height as usize - 1 - i } else { i };
        let row = canvas.row_mut(y)?;
        r.read_exact(row).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => IoError::Truncated {
                expected: (height as usize - i) * row_bytes,
            },
            _ => IoError::Io(e),
        })?;
        for _ in 0..pad {
            r.read_u8()?;
        }
    }

    // Resolve palette indices to gray values in place
    if let Some(palette) = palette {
        for byte in canvas.data_mut() {
            *byte = palette[*byte as usize];
        }
    }

    Ok(canvas)
}

/// Encodes a [`Canvas`] as a BMP stream.
pub fn encode(w: &mut impl Write, canvas: &Canvas) -> IoResult<()> {
    let row_bytes = canvas.row_bytes();
    let disk_row = padded_row_bytes(row_bytes);
    let palette_size = if canvas.depth() == 8 {
        (PALETTE_ENTRIES * 4) as u32
    } else {
        0
    };
    let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + palette_size;
    let image_size = (disk_row * canvas.height() as usize) as u32;

    // --- file header ---
    w.write_u16::<LittleEndian>(MAGIC)?;
    w.write_u32::<LittleEndian>(data_offset + image_size)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(data_offset)?;

    // --- info header ---
    w.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    w.write_i32::<LittleEndian>(canvas.width() as i32)?;
    w.write_i32::<LittleEndian>(canvas.height() as i32)?;
    w.write_u16::<LittleEndian>(1)?;
    w.write_u16::<LittleEndian>(canvas.depth())?;
    w.write_u32::<LittleEndian>(BI_RGB)?;
    w.write_u32::<LittleEndian>(image_size)?;
    w.write_i32::<LittleEndian>(0)?;
    w.write_i32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(if palette_size > 0 { 256 } else { 0 })?;
    w.write_u32::<LittleEndian>(0)?;

    // Grayscale palette for 8-bit data
    if canvas.depth() == 8 {
        for i in 0..PALETTE_ENTRIES {
            let v = i as u8;
            w.write_all(&[v, v, v, 0])?;
        }
    }

    // Bottom-up rows with padding
    let pad = [0u8; 3];
    for i in (0..canvas.height() as usize).rev() {
        let row = canvas.row(i)?;
        w.write_all(row)?;
        w.write_all(&pad[..disk_row - row_bytes])?;
    }
    Ok(())
}
