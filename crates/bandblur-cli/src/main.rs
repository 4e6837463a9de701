//! bandblur - parallel Gaussian blur over horizontal image bands
//!
//! Reads a BMP, splits it into overlapping bands, blurs one band per worker
//! thread, and reassembles the bands into a pixel-exact output BMP.

use anyhow::{bail, Context, Result};
use bandblur_filter::Kernel;
use bandblur_pipeline::{run::run, PipelineError};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bandblur")]
#[command(author, version, about = "Parallel Gaussian blur over horizontal image bands")]
#[command(long_about = "
Splits the input image into overlapping horizontal bands, blurs one band per
worker thread, and reassembles the filtered bands into the output image. The
result is byte-identical to blurring the whole image in one pass.

Examples:
  bandblur input.bmp output.bmp 2.0
  bandblur input.bmp output.bmp 1.5 --workers 8
  RUST_LOG=bandblur_pipeline=debug bandblur input.bmp output.bmp 2.0 -v
")]
struct Cli {
    /// Input BMP file
    input: PathBuf,

    /// Output BMP file (created or truncated)
    output: PathBuf,

    /// Gaussian standard deviation (must be > 0)
    sigma: f32,

    /// Number of band workers (0 = derive from available parallelism)
    #[arg(short, long, default_value = "0")]
    workers: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// One worker per core, minus the coordinator, floor 1.
fn derive_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1).max(1))
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Argument validation happens before any pipeline work starts.
    if cli.sigma.is_nan() || cli.sigma <= 0.0 {
        bail!("standard deviation must be > 0, got {}", cli.sigma);
    }
    let workers = if cli.workers == 0 {
        derive_workers()
    } else {
        cli.workers
    };

    let kernel = Kernel::gaussian(cli.sigma)
        .with_context(|| format!("building Gaussian kernel for sigma {}", cli.sigma))?;
    info!(sigma = cli.sigma, dim = kernel.dim(), workers, "run parameters");

    let src = bandblur_io::bmp::read(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    if cli.verbose {
        println!(
            "Blurring {} ({}x{}, {}-bit) with sigma {} over {} workers (kernel {}x{})",
            cli.input.display(),
            src.width(),
            src.height(),
            src.depth(),
            cli.sigma,
            workers,
            kernel.dim(),
            kernel.dim(),
        );
    }

    let blur = |px: &[u8], w: usize, h: usize, bpp: usize| {
        bandblur_filter::parallel::convolve(px, w, h, bpp, &kernel)
            .map_err(|e| PipelineError::Filter(e.to_string()))
    };
    let out = run(&src, workers, kernel.dim(), &blur).context("band pipeline failed")?;

    bandblur_io::bmp::write(&cli.output, &out)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    if cli.verbose {
        println!("Wrote {}", cli.output.display());
    }
    Ok(())
}
