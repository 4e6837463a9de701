//! # bandblur-pipeline
//!
//! Band partitioning, dispatch, asynchronous collection and reassembly for
//! parallel image filtering.
//!
//! The pipeline splits a source [`Canvas`](bandblur_core::Canvas) into N
//! overlapping horizontal bands ("tiles"), hands one tile to each worker
//! thread over a dedicated channel, gathers the filtered tiles back in
//! whatever order the workers finish, and writes each tile's interior rows —
//! margins stripped — into the output canvas at its original position. The
//! result is byte-identical to filtering the whole image sequentially.
//!
//! # Modules
//!
//! - [`tile`] - The [`Tile`] record and its lifecycle state machine
//! - [`partition`] - Splitting the source into overlapping bands
//! - [`protocol`] - Channel message types and the fixed per-tile field order
//! - [`dispatch`] - Shipping tiles to their workers
//! - [`worker`] - The per-worker receive/filter/reply loop and the
//!   [`TileFilter`] seam
//! - [`collect`] - Order-independent collection of filtered tiles
//! - [`reassemble`] - Margin stripping and placement into the output canvas
//! - [`run`] - One-call orchestration of the whole pipeline
//!
//! # Why overlapping bands?
//!
//! A convolution at row `y` reads rows `y - r ..= y + r`. Rows near a band
//! edge would see clamped, wrong-neighbor context if the band were cut
//! exactly; each shared edge therefore carries `r` extra rows of real
//! neighbor data. The workers filter those margin rows too (that is the
//! point of shipping them), and the reassembler discards them, so every
//! output row was computed with full context.
//!
//! # Example
//!
//! ```rust
//! use bandblur_core::Canvas;
//! use bandblur_pipeline::run::run;
//!
//! let src = Canvas::new(64, 64, 24).unwrap();
//! // Identity filter: workers copy their tile unchanged.
//! let copy = |px: &[u8], _w: usize, _h: usize, _bpp: usize| Ok(px.to_vec());
//! let out = run(&src, 2, 5, &copy).unwrap();
//! assert_eq!(out.data(), src.data());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod collect;
pub mod dispatch;
mod error;
pub mod partition;
pub mod protocol;
pub mod reassemble;
pub mod run;
pub mod tile;
pub mod worker;

pub use error::{PipelineError, PipelineResult};
pub use partition::Partition;
pub use tile::{Tile, TileId, TileState};
pub use worker::TileFilter;
