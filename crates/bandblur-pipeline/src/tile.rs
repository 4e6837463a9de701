//! The tile record and its lifecycle.
//!
//! A [`Tile`] is one horizontal band of the source image, including the
//! overlap margins it needs for correct convolution context at its shared
//! edges. Its shape is fixed at partition time; only the `pixels` buffer
//! changes hands afterwards (taken by the dispatcher, replaced by the
//! collector with the worker's filtered result, consumed by the
//! reassembler).
//!
//! The tile id is 1-based, equals the rank of the worker that filters it,
//! and is the *sole* key used to route the filtered band back to its
//! absolute position — arrival order carries no positional information.

use crate::{PipelineError, PipelineResult};
use std::ops::Range;

/// Stable tile identifier, 1-based. Doubles as the worker rank.
pub type TileId = usize;

/// Lifecycle of a tile within one run.
///
/// `Created -> Dispatched -> Arrived -> Placed`, never backwards. The
/// remote filtering step happens between `Dispatched` and `Arrived` and is
/// invisible to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// Carved out of the source, pixels not yet shipped.
    Created,
    /// Pixels shipped to the tile's worker.
    Dispatched,
    /// Filtered pixels received back.
    Arrived,
    /// Interior rows written into the output canvas. Terminal.
    Placed,
}

/// One horizontal band of the image, with overlap margins.
#[derive(Debug)]
pub struct Tile {
    /// 1-based sequence number; also the rank of the assigned worker.
    pub id: TileId,
    /// First absolute source row covered, margin included.
    pub row_start: usize,
    /// One past the last absolute source row covered, margin included.
    pub row_end: usize,
    /// Overlap rows at the low edge (0 for the image's first tile).
    pub bottom_margin: usize,
    /// Overlap rows at the high edge (0 for the image's last tile).
    pub top_margin: usize,
    /// Tile width in pixels (always the full image width).
    pub width: u32,
    /// Tile height in rows, `row_end - row_start`.
    pub height: usize,
    /// Pixel payload size in bytes.
    pub size_bytes: usize,
    /// Owned pixel buffer. Empty while the tile is out with its worker.
    pub pixels: Vec<u8>,
    state: TileState,
}

impl Tile {
    /// Creates a tile in the `Created` state.
    pub(crate) fn new(
        id: TileId,
        row_start: usize,
        row_end: usize,
        bottom_margin: usize,
        top_margin: usize,
        width: u32,
        pixels: Vec<u8>,
    ) -> Self {
        let height = row_end - row_start;
        let size_bytes = pixels.len();
        Self {
            id,
            row_start,
            row_end,
            bottom_margin,
            top_margin,
            width,
            height,
            size_bytes,
            pixels,
            state: TileState::Created,
        }
    }

    /// Absolute row range this tile is authoritative for: its covered range
    /// minus the overlap margins. These ranges tile `[0, H)` exactly across
    /// a partition.
    #[inline]
    pub fn interior_rows(&self) -> Range<usize> {
        self.row_start + self.bottom_margin..self.row_end - self.top_margin
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> TileState {
        self.state
    }

    /// Advances the tile to `next`, enforcing the forward-only lifecycle.
    pub(crate) fn advance(&mut self, next: TileState) -> PipelineResult<()> {
        let legal = matches!(
            (self.state, next),
            (TileState::Created, TileState::Dispatched)
                | (TileState::Dispatched, TileState::Arrived)
                | (TileState::Arrived, TileState::Placed)
        );
        if !legal {
            return Err(PipelineError::BadState {
                id: self.id,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Tile {
        Tile::new(2, 22, 50, 2, 2, 50, vec![0u8; 28 * 50 * 3])
    }

    #[test]
    fn test_tile_shape() {
        let t = tile();
        assert_eq!(t.height, 28);
        assert_eq!(t.size_bytes, 28 * 50 * 3);
        assert_eq!(t.interior_rows(), 24..48);
        assert_eq!(t.state(), TileState::Created);
    }

    #[test]
    fn test_lifecycle_forward() {
        let mut t = tile();
        t.advance(TileState::Dispatched).unwrap();
        t.advance(TileState::Arrived).unwrap();
        t.advance(TileState::Placed).unwrap();
        assert_eq!(t.state(), TileState::Placed);
    }

    #[test]
    fn test_lifecycle_no_skip_or_regress() {
        let mut t = tile();
        assert!(t.advance(TileState::Arrived).is_err());
        t.advance(TileState::Dispatched).unwrap();
        assert!(t.advance(TileState::Placed).is_err());
        assert!(t.advance(TileState::Created).is_err());
        t.advance(TileState::Arrived).unwrap();
        t.advance(TileState::Placed).unwrap();
        // Terminal: a second placement is the duplicate-arrival case
        let err = t.advance(TileState::Placed).unwrap_err();
        assert!(matches!(err, PipelineError::BadState { id: 2, .. }));
    }
}
