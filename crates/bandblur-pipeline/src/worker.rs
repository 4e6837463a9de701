//! The per-worker receive/filter/reply loop.
//!
//! A worker is bound 1:1 to a tile for the run's lifetime. It receives the
//! five tile fields in the fixed protocol order (any deviation is a fatal
//! protocol error), filters the *entire* tile — margins included, that is
//! why the margins were shipped — through the injected [`TileFilter`], sends
//! the filtered tile back tagged with its id, and returns.
//!
//! Filtering is injected rather than baked in: the pipeline's correctness
//! claims (placement, order independence) are about moving bytes, and tests
//! exercise them with an identity filter.

use crate::protocol::{FieldKind, FilteredTile, TileField, WorkerReply};
use crate::tile::TileId;
use crate::{PipelineError, PipelineResult};
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, trace};

/// The convolution seam between the pipeline and the numeric filter crate.
///
/// Implementations receive one tile's pixels (margins included) and return
/// a filtered buffer of the same length. Any `Fn` with the matching
/// signature qualifies:
///
/// ```rust
/// use bandblur_pipeline::TileFilter;
///
/// let identity = |px: &[u8], _w: usize, _h: usize, _bpp: usize| Ok(px.to_vec());
/// fn assert_filter(_f: &impl TileFilter) {}
/// assert_filter(&identity);
/// ```
pub trait TileFilter: Sync {
    /// Filters one tile. `width` and `height` are the tile's own dimensions;
    /// `bytes_per_pixel` is derived from the color depth.
    fn apply(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
    ) -> PipelineResult<Vec<u8>>;
}

impl<F> TileFilter for F
where
    F: Fn(&[u8], usize, usize, usize) -> PipelineResult<Vec<u8>> + Sync,
{
    fn apply(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
    ) -> PipelineResult<Vec<u8>> {
        self(pixels, width, height, bytes_per_pixel)
    }
}

/// Runs one worker to completion: receive a tile, filter it, reply.
///
/// Errors are reported through the reply channel so the collector aborts the
/// run; if the coordinator is already gone there is nobody left to tell, and
/// the send failure is deliberately ignored.
pub fn run_worker<F: TileFilter>(
    id: TileId,
    commands: &Receiver<TileField>,
    replies: &Sender<WorkerReply>,
    filter: &F,
) {
    let reply = filter_one_tile(id, commands, filter);
    let _ = replies.send(reply);
}

/// Receives the tile fields in protocol order and applies the filter.
fn filter_one_tile<F: TileFilter>(
    id: TileId,
    commands: &Receiver<TileField>,
    filter: &F,
) -> PipelineResult<FilteredTile> {
    let recv = |expected: FieldKind| -> PipelineResult<TileField> {
        commands
            .recv()
            .map_err(|_| PipelineError::CommandChannelClosed(id))?
            .expect(expected)
    };

    let TileField::Size(size) = recv(FieldKind::Size)? else {
        unreachable!("expect() checked the tag");
    };
    let TileField::Width(width) = recv(FieldKind::Width)? else {
        unreachable!("expect() checked the tag");
    };
    let TileField::Height(height) = recv(FieldKind::Height)? else {
        unreachable!("expect() checked the tag");
    };
    let TileField::Depth(depth) = recv(FieldKind::Depth)? else {
        unreachable!("expect() checked the tag");
    };
    let TileField::Payload(pixels) = recv(FieldKind::Payload)? else {
        unreachable!("expect() checked the tag");
    };
    trace!(worker = id, size, width, height, depth, "worker received tile");

    if pixels.len() != size {
        return Err(PipelineError::PayloadSize {
            id,
            expected: size,
            got: pixels.len(),
        });
    }

    let bytes_per_pixel = (depth / 8) as usize;
    let filtered = filter.apply(&pixels, width as usize, height, bytes_per_pixel)?;
    if filtered.len() != size {
        return Err(PipelineError::PayloadSize {
            id,
            expected: size,
            got: filtered.len(),
        });
    }

    debug!(worker = id, bytes = filtered.len(), "worker filtered tile");
    Ok(FilteredTile {
        id,
        pixels: filtered,
    })
}
