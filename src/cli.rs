//! Command-line arguments for the `movie_charts` binary

use crate::config::{AnalysisConfig, OutputFormat};
use crate::movies::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Render exploratory charts for an IMDB-style movie CSV")]
pub struct Args {
    /// Movie CSV to analyse (overrides config)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the charts are written to (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Path to config JSON (default: movie_charts.json if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image format: png or svg (overrides config)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Number of rating histogram bins (overrides config)
    #[arg(long)]
    pub bins: Option<usize>,

    /// Number of titles in the revenue ranking (overrides config)
    #[arg(long)]
    pub top: Option<usize>,

    /// Skip the density curve on the rating histogram
    #[arg(long, default_value_t = false)]
    pub no_kde: bool,

    /// Per-chart size override, repeatable (e.g. --size genres=1400x800)
    #[arg(long = "size", value_name = "CHART=WxH")]
    pub sizes: Vec<String>,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut AnalysisConfig) -> Result<()> {
        if let Some(ref input) = self.input {
            config.input = input.clone();
        }
        if let Some(ref output_dir) = self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(ref format) = self.format {
            config.output_format = OutputFormat::parse(format)?;
        }
        if let Some(bins) = self.bins {
            config.histogram_bins = bins;
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if self.no_kde {
            config.kde = false;
        }
        for size in &self.sizes {
            config.sizes.apply_override(size)?;
        }
        Ok(())
    }
}
