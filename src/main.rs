//! Movie Charts - Main entry point
//!
//! Loads a movie CSV, renders the five exploratory charts and writes them to
//! the output directory.
//!
//! Usage:
//! ```bash
//! movie_charts IMDB-Movie-Data.csv --output-dir plots
//! RUST_LOG=debug movie_charts --config movie_charts.json --format svg
//! ```

use anyhow::Context;
use clap::Parser;
use movie_charts::cli::Args;
use movie_charts::config::AnalysisConfig;
use movie_charts::pipeline;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main]
async fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("✗ Chart generation failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config =
        AnalysisConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config)?;
    config.validate()?;

    println!("Movie Charts v{}", env!("CARGO_PKG_VERSION"));
    println!("  Input: {}", config.input.display());
    println!("  Output: {}", config.output_dir.display());
    println!("  Format: {}", config.output_format.extension());
    println!();

    let results = pipeline::generate_charts(&config)
        .await
        .with_context(|| format!("Failed to chart {}", config.input.display()))?;

    for chart in &results {
        println!(
            "✓ Saved {} ({} bytes, {}×{})",
            chart.path.display(),
            chart.bytes,
            chart.width,
            chart.height
        );
    }
    println!("\n{} chart(s) written", results.len());

    Ok(())
}
