//! One-call orchestration of the band pipeline.
//!
//! `run` wires the stages together for one image: partition the source,
//! spawn one scoped worker thread per tile, dispatch, collect into a fresh
//! output canvas, and hand it back. Worker threads are scoped so the
//! injected filter can be borrowed; they all terminate before `run`
//! returns, success or failure.

use crate::collect::collect;
use crate::dispatch::dispatch;
use crate::partition::partition;
use crate::protocol::{TileField, WorkerReply};
use crate::worker::{run_worker, TileFilter};
use crate::PipelineResult;
use bandblur_core::Canvas;
use std::sync::mpsc;
use std::thread;
use tracing::info;

/// Filters `src` through `workers` parallel band workers.
///
/// `kernel_dim` is the convolution kernel dimension the bands must carry
/// overlap for; the filter itself is injected. The output canvas is
/// byte-identical to filtering the whole image sequentially with the same
/// filter.
///
/// # Errors
///
/// Propagates partitioning, protocol, transport and filter errors; see
/// [`crate::PipelineError`].
///
/// # Example
///
/// ```rust
/// use bandblur_core::Canvas;
/// use bandblur_pipeline::run::run;
///
/// let src = Canvas::new(32, 48, 24).unwrap();
/// let copy = |px: &[u8], _w: usize, _h: usize, _bpp: usize| Ok(px.to_vec());
/// let out = run(&src, 3, 3, &copy).unwrap();
/// assert_eq!(out.data(), src.data());
/// ```
pub fn run<F: TileFilter>(
    src: &Canvas,
    workers: usize,
    kernel_dim: usize,
    filter: &F,
) -> PipelineResult<Canvas> {
    let mut parts = partition(src, workers, kernel_dim)?;
    let depth = src.depth();
    let mut out = Canvas::new(src.width(), src.height(), depth)?;
    info!(
        workers,
        kernel_dim,
        overlap = parts.overlap,
        width = src.width(),
        height = src.height(),
        "starting band pipeline"
    );

    let (reply_tx, reply_rx) = mpsc::channel::<WorkerReply>();
    let result = thread::scope(|s| {
        let mut senders = Vec::with_capacity(workers);
        for rank in 1..=workers {
            let (cmd_tx, cmd_rx) = mpsc::channel::<TileField>();
            let replies = reply_tx.clone();
            s.spawn(move || run_worker(rank, &cmd_rx, &replies, filter));
            senders.push(cmd_tx);
        }
        // Collector must see the channel close if every worker dies, so the
        // coordinator's own sender cannot stay alive.
        drop(reply_tx);

        dispatch(&mut parts.tiles, depth, &senders)
            .and_then(|()| collect(&mut parts, &reply_rx, &mut out))
    });
    result?;

    info!("band pipeline finished");
    Ok(out)
}
