//! Splitting a source canvas into overlapping horizontal bands.
//!
//! The partitioner produces exactly one [`Tile`] per worker. Each tile
//! covers a contiguous run of source rows plus `overlap = (kernel_dim-1)/2`
//! extra rows on every edge it shares with a neighbor, so that convolution
//! near the cut sees real pixels instead of clamped ones. The image's
//! outermost edges get no margin; the border clamping there is exactly what
//! a sequential whole-image convolution would do.
//!
//! The base band height is `floor(H / num) - 1`, and the final tile always
//! absorbs whatever rows remain, so the margin-free interiors tile `[0, H)`
//! exactly — no gaps, no duplication — for every accepted input.

use crate::tile::{Tile, TileId};
use crate::{PipelineError, PipelineResult};
use bandblur_core::Canvas;
use tracing::debug;

/// The canonical tile list for one run, plus the shared sizing facts the
/// dispatcher and collector need.
#[derive(Debug)]
pub struct Partition {
    /// All tiles, ordered by id; tile `id` lives at index `id - 1`.
    pub tiles: Vec<Tile>,
    /// Overlap margin in rows, `(kernel_dim - 1) / 2`.
    pub overlap: usize,
    /// Largest tile payload in bytes. Sizes shared receive buffers.
    pub max_tile_size: usize,
}

impl Partition {
    /// Looks up a tile by id.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        if id == 0 {
            return None;
        }
        self.tiles.get(id - 1)
    }

    /// Looks up a tile mutably by id.
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        if id == 0 {
            return None;
        }
        self.tiles.get_mut(id - 1)
    }
}

/// Splits `src` into `num` overlapping bands for a kernel of dimension
/// `kernel_dim`.
///
/// # Errors
///
/// - [`PipelineError::NoWorkers`] if `num` is zero
/// - [`PipelineError::InvalidKernelDim`] if `kernel_dim` is zero or even
/// - [`PipelineError::SegmentTooSmall`] if the base band height
///   `floor(H/num) - 1` does not exceed `kernel_dim` (too many workers or
///   too large a radius for this image)
///
/// # Example
///
/// ```rust
/// use bandblur_core::Canvas;
/// use bandblur_pipeline::partition::partition;
///
/// let src = Canvas::new(50, 100, 24).unwrap();
/// let p = partition(&src, 4, 5).unwrap();
/// assert_eq!(p.tiles.len(), 4);
/// assert_eq!(p.overlap, 2);
/// assert_eq!(p.tiles[0].interior_rows(), 0..24);
/// assert_eq!(p.tiles[3].row_end, 100);
/// ```
pub fn partition(src: &Canvas, num: usize, kernel_dim: usize) -> PipelineResult<Partition> {
    if num == 0 {
        return Err(PipelineError::NoWorkers);
    }
    if kernel_dim == 0 || kernel_dim % 2 == 0 {
        return Err(PipelineError::InvalidKernelDim(kernel_dim));
    }
    let height = src.height() as usize;
    let segment_height = (height / num).saturating_sub(1);
    if segment_height <= kernel_dim {
        return Err(PipelineError::SegmentTooSmall {
            segment_height,
            kernel_dim,
        });
    }
    let overlap = (kernel_dim - 1) / 2;

    let mut tiles = Vec::with_capacity(num);
    let mut max_tile_size = 0;
    for i in 0..num {
        let last = i == num - 1;
        let bottom_margin = if i == 0 { 0 } else { overlap };
        // The last tile absorbs every remaining row instead of leaving a
        // short (or uncovered) remainder band.
        let (row_end, top_margin) = if last {
            (height, 0)
        } else {
            (segment_height * (i + 1) + overlap, overlap)
        };
        let row_start = segment_height * i - bottom_margin;

        let pixels = src.rows(row_start..row_end)?.to_vec();
        let tile = Tile::new(
            i + 1,
            row_start,
            row_end,
            bottom_margin,
            top_margin,
            src.width(),
            pixels,
        );
        max_tile_size = max_tile_size.max(tile.size_bytes);
        tiles.push(tile);
    }

    debug!(
        num,
        kernel_dim, overlap, segment_height, max_tile_size, "partitioned source canvas"
    );
    Ok(Partition {
        tiles,
        overlap,
        max_tile_size,
    })
}
