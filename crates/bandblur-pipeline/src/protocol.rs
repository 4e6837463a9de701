//! Channel message types and the fixed per-tile field order.
//!
//! Each worker owns a dedicated command channel; the coordinator sends one
//! tile down it as five tagged messages in a fixed order: size, width,
//! height, depth, then the pixel payload. The tag ([`FieldKind`]) is what
//! keeps header fields and the bulk payload from cross-talking; the order is
//! a protocol contract the worker enforces ([`crate::worker`]). The channel
//! itself guarantees per-sender FIFO, so the contract reduces to "the
//! dispatcher never interleaves".
//!
//! Filtered tiles travel back on a single shared result channel, tagged with
//! the tile id. Sharing one return channel is what makes the collector's
//! blocking receive a "first completed of N outstanding" wait.

use crate::tile::TileId;
use crate::{PipelineError, PipelineResult};

/// The five field kinds of the per-tile exchange, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Payload size in bytes, announced ahead of the data.
    Size,
    /// Tile width in pixels.
    Width,
    /// Tile height in rows, margins included.
    Height,
    /// Color depth in bits per pixel.
    Depth,
    /// The pixel payload itself.
    Payload,
}

/// The mandated field order for one tile.
pub const FIELD_ORDER: [FieldKind; 5] = [
    FieldKind::Size,
    FieldKind::Width,
    FieldKind::Height,
    FieldKind::Depth,
    FieldKind::Payload,
];

/// One tagged message of the per-tile exchange.
#[derive(Debug)]
pub enum TileField {
    /// Payload size in bytes.
    Size(usize),
    /// Tile width in pixels.
    Width(u32),
    /// Tile height in rows.
    Height(usize),
    /// Color depth in bits per pixel.
    Depth(u16),
    /// The pixel payload.
    Payload(Vec<u8>),
}

impl TileField {
    /// Returns the message's tag.
    pub fn kind(&self) -> FieldKind {
        match self {
            TileField::Size(_) => FieldKind::Size,
            TileField::Width(_) => FieldKind::Width,
            TileField::Height(_) => FieldKind::Height,
            TileField::Depth(_) => FieldKind::Depth,
            TileField::Payload(_) => FieldKind::Payload,
        }
    }

    /// Checks this message against the tag the receiver was waiting for.
    pub fn expect(self, expected: FieldKind) -> PipelineResult<Self> {
        let got = self.kind();
        if got != expected {
            return Err(PipelineError::UnexpectedField { expected, got });
        }
        Ok(self)
    }
}

/// A filtered tile on its way back to the coordinator.
#[derive(Debug)]
pub struct FilteredTile {
    /// Id of the tile (and rank of the worker that filtered it).
    pub id: TileId,
    /// The filtered pixel buffer, margins included.
    pub pixels: Vec<u8>,
}

/// What a worker sends back: its filtered tile, or the error that killed it.
pub type WorkerReply = PipelineResult<FilteredTile>;
