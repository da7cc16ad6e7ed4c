//! Redundancy statistics for detector error models.
//!
//! Reads a DEM, optionally merges identical mechanisms, drops
//! zero-probability ones and reports how many of the remaining mechanisms are
//! GF(2) combinations of earlier ones.
//!
//! # Usage
//!
//! ```bash
//! # Merge, prune and report
//! cargo run --release -p krama-stats -- --dem path/to/model.dem
//!
//! # Skip merging
//! cargo run --release -p krama-stats -- --dem model.dem --no-merge-errors
//!
//! # Rewrite probabilities from trial counts, then report
//! cargo run --release -p krama-stats -- --dem model.dem \
//!     --counts counts.txt --shots 100000 --out reweighted.dem
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

mod counts;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use krama_core::{
    dem_from_counts, dem_stats, merge_identical_errors, parse_dem, remove_zero_probability_errors,
};

#[derive(Parser, Debug)]
#[command(name = "krama-stats")]
#[command(about = "Count redundant error mechanisms in a detector error model")]
struct Args {
    /// Path to the DEM file
    #[arg(long)]
    dem: PathBuf,

    /// Keep mechanisms with identical symptoms separate
    #[arg(long)]
    no_merge_errors: bool,

    /// Whitespace-separated trial counts, one per mechanism after pruning
    #[arg(long, requires = "shots")]
    counts: Option<PathBuf>,

    /// Number of shots the counts were collected over
    #[arg(long, requires = "counts")]
    shots: Option<u64>,

    /// Write the reweighted model here (requires --counts)
    #[arg(long, requires = "counts")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.dem)
        .with_context(|| format!("failed to read {}", args.dem.display()))?;
    let mut model =
        parse_dem(&text).with_context(|| format!("failed to parse {}", args.dem.display()))?;
    info!(
        mechanisms = model.len(),
        detectors = model.num_detectors(),
        observables = model.num_observables(),
        "loaded model"
    );

    if !args.no_merge_errors {
        model = merge_identical_errors(&model);
    }
    model = remove_zero_probability_errors(&model);

    if let (Some(path), Some(shots)) = (&args.counts, args.shots) {
        let counts = counts::read_counts(path)?;
        model = dem_from_counts(&model, &counts, shots)
            .with_context(|| format!("failed to apply counts from {}", path.display()))?;
        // Mechanisms never seen in any shot drop out here.
        model = remove_zero_probability_errors(&model);

        if let Some(out) = &args.out {
            fs::write(out, model.to_string())
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "wrote reweighted model");
        }
    }

    println!("{}", dem_stats(&model));
    Ok(())
}
