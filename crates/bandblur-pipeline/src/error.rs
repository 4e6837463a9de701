//! Error types for the band pipeline.
//!
//! The taxonomy follows the run's phases: sizing errors from the
//! partitioner, protocol errors from dispatch/worker field exchange,
//! transport errors from closed channels, and routing errors from the
//! collector. None of them are recoverable; the run aborts on the first one.

use crate::protocol::FieldKind;
use crate::tile::{TileId, TileState};
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur during a band pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Worker count is zero.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// Kernel dimension is zero or even.
    #[error("invalid kernel dimension: {0} (must be odd and > 0)")]
    InvalidKernelDim(usize),

    /// Image too small for the worker count and blur radius.
    #[error(
        "segment height {segment_height} does not exceed the kernel dimension {kernel_dim}; \
         use fewer workers or a smaller radius"
    )]
    SegmentTooSmall {
        /// Base band height derived from the image and worker count
        segment_height: usize,
        /// Kernel dimension the bands must accommodate
        kernel_dim: usize,
    },

    /// A tile field arrived out of the fixed protocol order.
    #[error("protocol violation: expected {expected:?} field, got {got:?}")]
    UnexpectedField {
        /// Field the receiver was waiting for
        expected: FieldKind,
        /// Field that actually arrived
        got: FieldKind,
    },

    /// Payload length doesn't match the announced tile size.
    #[error("payload size mismatch for tile {id}: announced {expected} bytes, got {got}")]
    PayloadSize {
        /// Tile the payload belongs to
        id: TileId,
        /// Announced size in bytes
        expected: usize,
        /// Received size in bytes
        got: usize,
    },

    /// Command channel to a worker closed before dispatch completed.
    #[error("command channel to worker {0} closed before its tile was sent")]
    CommandChannelClosed(TileId),

    /// Result channel closed with tiles still outstanding (a worker died).
    #[error("result channel closed with tiles still outstanding")]
    ResultChannelClosed,

    /// A result arrived for a tile id outside the run's tile list.
    #[error("received result for unknown tile id {0}")]
    UnknownTile(TileId),

    /// A second result arrived for an already-placed tile.
    #[error("received a second result for tile {0}")]
    DuplicateTile(TileId),

    /// A tile was asked to make an illegal state transition.
    #[error("tile {id} cannot move from {from:?} to {to:?}")]
    BadState {
        /// Tile attempting the transition
        id: TileId,
        /// Current lifecycle state
        from: TileState,
        /// Requested lifecycle state
        to: TileState,
    },

    /// A filtered tile doesn't fit the output canvas.
    #[error("tile {id} does not fit the output canvas: {reason}")]
    TileMismatch {
        /// Offending tile
        id: TileId,
        /// What didn't line up
        reason: String,
    },

    /// The injected filter failed on a worker.
    #[error("filter error: {0}")]
    Filter(String),

    /// Canvas operation failed.
    #[error(transparent)]
    Canvas(#[from] bandblur_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizing_message_names_both_numbers() {
        let err = PipelineError::SegmentTooSmall {
            segment_height: 1,
            kernel_dim: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains('1'));
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_canvas_error_passthrough() {
        let core = bandblur_core::Error::UnsupportedDepth(16);
        let err: PipelineError = core.into();
        assert!(err.to_string().contains("16"));
    }
}
