//! Shipping tiles to their workers.
//!
//! The dispatcher walks the canonical tile list and sends each tile to the
//! worker whose rank equals the tile's id, as five messages in the fixed
//! protocol order (see [`crate::protocol`]). The pixel payload is *moved*
//! out of the tile — ownership transfers to the worker — leaving the shape
//! metadata behind for the collector and reassembler.
//!
//! Sends never block (the channels are unbounded) and the dispatcher has
//! nothing else to do while they complete, so no send-side asynchrony is
//! needed.

use crate::protocol::TileField;
use crate::tile::{Tile, TileState};
use crate::{PipelineError, PipelineResult};
use std::sync::mpsc::Sender;
use tracing::debug;

/// Sends every tile to its worker, in id order.
///
/// `senders[rank - 1]` must be the command channel of worker `rank`; the
/// caller spawns one worker per tile before dispatching.
///
/// # Errors
///
/// Returns [`PipelineError::CommandChannelClosed`] if a worker's channel is
/// already closed (the worker died before receiving its tile).
pub fn dispatch(
    tiles: &mut [Tile],
    depth: u16,
    senders: &[Sender<TileField>],
) -> PipelineResult<()> {
    for tile in tiles.iter_mut() {
        let sender = senders
            .get(tile.id - 1)
            .ok_or(PipelineError::CommandChannelClosed(tile.id))?;
        let closed = |_| PipelineError::CommandChannelClosed(tile.id);

        // Fixed field order: size, width, height, depth, payload
        sender.send(TileField::Size(tile.size_bytes)).map_err(closed)?;
        sender.send(TileField::Width(tile.width)).map_err(closed)?;
        sender.send(TileField::Height(tile.height)).map_err(closed)?;
        sender.send(TileField::Depth(depth)).map_err(closed)?;
        let payload = std::mem::take(&mut tile.pixels);
        sender.send(TileField::Payload(payload)).map_err(closed)?;

        tile.advance(TileState::Dispatched)?;
        debug!(
            id = tile.id,
            rows = ?(tile.row_start..tile.row_end),
            bytes = tile.size_bytes,
            "dispatched tile"
        );
    }
    Ok(())
}
