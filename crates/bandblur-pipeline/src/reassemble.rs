//! Margin stripping and placement into the output canvas.
//!
//! The reassembler is a pure copy: the tile's pixels are already filtered,
//! and only its interior rows — the rows it is authoritative for — are
//! written into the output canvas, at the absolute offsets recorded in the
//! tile itself. Because placement keys off the tile's row fields and never
//! off arrival sequence, tiles can be placed in any order and the canvas
//! comes out byte-identical.

use crate::tile::Tile;
use crate::{PipelineError, PipelineResult};
use bandblur_core::Canvas;
use tracing::trace;

/// Writes `tile`'s interior rows into `out` at their absolute position.
///
/// Skips `bottom_margin` rows at the tile's low edge and `top_margin` rows
/// at its high edge; the neighbors own those.
///
/// # Errors
///
/// Returns [`PipelineError::TileMismatch`] if the tile's width or payload
/// size doesn't line up with the output canvas, and a canvas error if its
/// interior range falls outside the output height.
pub fn place_tile(tile: &Tile, out: &mut Canvas) -> PipelineResult<()> {
    if tile.width != out.width() {
        return Err(PipelineError::TileMismatch {
            id: tile.id,
            reason: format!("tile width {} vs canvas width {}", tile.width, out.width()),
        });
    }
    let row_bytes = out.row_bytes();
    if tile.pixels.len() != tile.height * row_bytes {
        return Err(PipelineError::TileMismatch {
            id: tile.id,
            reason: format!(
                "payload {} bytes vs {} rows of {} bytes",
                tile.pixels.len(),
                tile.height,
                row_bytes
            ),
        });
    }

    let interior = tile.interior_rows();
    // Tile-local offsets of the interior band
    let skip = tile.bottom_margin * row_bytes;
    let take = interior.len() * row_bytes;
    let src = &tile.pixels[skip..skip + take];
    out.rows_mut(interior.clone())?.copy_from_slice(src);

    trace!(id = tile.id, rows = ?interior, "placed tile interior");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    const W: u32 = 4;
    const RB: usize = W as usize * 3;

    /// A tile covering absolute rows [row_start, row_end) whose every byte
    /// is its absolute source row number.
    fn labeled_tile(id: usize, row_start: usize, row_end: usize, bottom: usize, top: usize) -> Tile {
        let mut pixels = Vec::with_capacity((row_end - row_start) * RB);
        for y in row_start..row_end {
            pixels.extend(std::iter::repeat_n(y as u8, RB));
        }
        Tile::new(id, row_start, row_end, bottom, top, W, pixels)
    }

    fn assert_rows_labeled(out: &Canvas, range: std::ops::Range<usize>) {
        for y in range {
            assert!(
                out.row(y).unwrap().iter().all(|&b| b == y as u8),
                "row {y} not placed correctly"
            );
        }
    }

    #[test]
    fn test_strips_margins() {
        let mut out = Canvas::new(W, 12, 24).unwrap();
        let tile = labeled_tile(2, 2, 10, 2, 2);
        place_tile(&tile, &mut out).unwrap();

        assert_rows_labeled(&out, 4..8);
        // Margin rows and everything outside stay untouched
        for y in (0..4).chain(8..12) {
            assert!(out.row(y).unwrap().iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_order_independence() {
        // Three tiles of a 12-row image, placed in every permutation
        let tiles = [
            labeled_tile(1, 0, 5, 0, 1),
            labeled_tile(2, 3, 9, 1, 1),
            labeled_tile(3, 7, 12, 1, 0),
        ];
        let mut reference: Option<Canvas> = None;
        for order in [
            [0usize, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ] {
            let mut out = Canvas::new(W, 12, 24).unwrap();
            for &i in &order {
                place_tile(&tiles[i], &mut out).unwrap();
            }
            assert_rows_labeled(&out, 0..12);
            match &reference {
                None => reference = Some(out),
                Some(r) => assert_eq!(&out, r, "order {order:?} diverged"),
            }
        }
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let mut out = Canvas::new(8, 12, 24).unwrap();
        let tile = labeled_tile(1, 0, 5, 0, 1);
        let err = place_tile(&tile, &mut out).unwrap_err();
        assert!(matches!(err, PipelineError::TileMismatch { id: 1, .. }));
    }

    #[test]
    fn test_short_payload_rejected() {
        let mut out = Canvas::new(W, 12, 24).unwrap();
        let mut tile = labeled_tile(1, 0, 5, 0, 1);
        tile.pixels.truncate(10);
        let err = place_tile(&tile, &mut out).unwrap_err();
        assert!(matches!(err, PipelineError::TileMismatch { .. }));
    }

    #[test]
    fn test_interior_out_of_canvas_rejected() {
        let mut out = Canvas::new(W, 6, 24).unwrap();
        let tile = labeled_tile(1, 2, 10, 2, 2);
        let err = place_tile(&tile, &mut out).unwrap_err();
        assert!(matches!(err, PipelineError::Canvas(_)));
    }
}
