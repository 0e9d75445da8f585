//! Analysis configuration
//!
//! Configuration is layered: built-in defaults, then an optional JSON file,
//! then command-line overrides (applied by the binary). `validate()` runs
//! once everything is merged.
//!
//! Default chart sizes match the figure sizes of the original notebook
//! charts rendered at 100 dpi.

use crate::charts::ChartKind;
use crate::movies::error::{AnalysisError, Result};
use crate::movies::palettes::{parse_hex_color, PALETTE_REGISTRY};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "movie_charts.json";

/// Valid pixel range for either chart dimension
const MIN_DIMENSION: u32 = 100;
const MAX_DIMENSION: u32 = 10_000;

/// Image format written for every chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(AnalysisError::Config(format!(
                "Unknown output format '{}', expected 'png' or 'svg'",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Chart dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse `"WIDTHxHEIGHT"` (e.g. `"1200x600"`)
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let (w, h) = trimmed
            .split_once(['x', 'X'])
            .ok_or_else(|| AnalysisError::Config(format!("Invalid size '{}', expected WxH", trimmed)))?;

        let parse_dim = |s: &str| {
            s.trim().parse::<u32>().map_err(|_| {
                AnalysisError::Config(format!("Invalid size '{}', expected WxH", trimmed))
            })
        };

        let size = Self::new(parse_dim(w)?, parse_dim(h)?);
        size.validate()?;
        Ok(size)
    }

    fn validate(&self) -> Result<()> {
        for dim in [self.width, self.height] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dim) {
                return Err(AnalysisError::Config(format!(
                    "Chart dimension {} out of valid range [{}-{}]",
                    dim, MIN_DIMENSION, MAX_DIMENSION
                )));
            }
        }
        Ok(())
    }
}

/// Per-chart pixel sizes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSizes {
    pub ratings: ChartSize,
    pub revenue: ChartSize,
    pub scatter: ChartSize,
    pub genres: ChartSize,
    pub runtime: ChartSize,
}

impl Default for ChartSizes {
    fn default() -> Self {
        Self {
            ratings: ChartSize::new(1000, 600),
            revenue: ChartSize::new(1200, 600),
            scatter: ChartSize::new(800, 600),
            genres: ChartSize::new(1200, 600),
            runtime: ChartSize::new(1000, 600),
        }
    }
}

impl ChartSizes {
    pub fn get(&self, kind: ChartKind) -> ChartSize {
        *self.slot(kind)
    }

    pub fn set(&mut self, kind: ChartKind, size: ChartSize) {
        *self.slot_mut(kind) = size;
    }

    /// Apply an override of the form `"<chart>=<W>x<H>"`, e.g. `"genres=1400x800"`
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (key, size) = spec.split_once('=').ok_or_else(|| {
            AnalysisError::Config(format!("Invalid size override '{}', expected CHART=WxH", spec))
        })?;
        let kind = ChartKind::from_key(key).ok_or_else(|| {
            AnalysisError::Config(format!(
                "Unknown chart '{}', expected one of: {}",
                key.trim(),
                ChartKind::ALL.map(|k| k.key()).join(", ")
            ))
        })?;
        self.set(kind, ChartSize::parse(size)?);
        Ok(())
    }

    fn slot(&self, kind: ChartKind) -> &ChartSize {
        match kind {
            ChartKind::RatingDistribution => &self.ratings,
            ChartKind::TopRevenue => &self.revenue,
            ChartKind::RatingVsRevenue => &self.scatter,
            ChartKind::GenreCounts => &self.genres,
            ChartKind::RuntimeByYear => &self.runtime,
        }
    }

    fn slot_mut(&mut self, kind: ChartKind) -> &mut ChartSize {
        match kind {
            ChartKind::RatingDistribution => &mut self.ratings,
            ChartKind::TopRevenue => &mut self.revenue,
            ChartKind::RatingVsRevenue => &mut self.scatter,
            ChartKind::GenreCounts => &mut self.genres,
            ChartKind::RuntimeByYear => &mut self.runtime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Movie CSV to read
    pub input: PathBuf,

    /// Directory receiving the chart files (created if missing)
    pub output_dir: PathBuf,

    /// Image format for every chart
    pub output_format: OutputFormat,

    /// Number of equal-width rating histogram bins
    pub histogram_bins: usize,

    /// Overlay a density curve on the rating histogram
    pub kde: bool,

    /// Grid points the density curve is evaluated on
    pub kde_points: usize,

    /// Number of titles in the revenue ranking
    pub top_n: usize,

    /// Separator between genres inside one `Genre` cell
    pub genre_separator: String,

    /// Histogram fill color as hex
    pub histogram_color: String,

    /// Palette for the revenue bars
    pub bar_palette: String,

    /// Palette for the genre bars
    pub genre_palette: String,

    pub sizes: ChartSizes,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("IMDB-Movie-Data.csv"),
            output_dir: PathBuf::from("plots"),
            output_format: OutputFormat::Png,
            histogram_bins: 10,
            kde: true,
            kde_points: 200,
            top_n: 10,
            genre_separator: ",".to_string(),
            histogram_color: "#0000FF".to_string(),
            bar_palette: "Viridis".to_string(),
            genre_palette: "Coolwarm".to_string(),
            sizes: ChartSizes::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration
    ///
    /// - `Some(path)`: the file must exist and parse
    /// - `None`: use `movie_charts.json` from the working directory if present,
    ///   otherwise defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse a JSON object; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check merged configuration values
    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(AnalysisError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(AnalysisError::Config("top_n must be at least 1".to_string()));
        }
        if self.kde && self.kde_points < 2 {
            return Err(AnalysisError::Config(
                "kde_points must be at least 2".to_string(),
            ));
        }
        if self.genre_separator.is_empty() {
            return Err(AnalysisError::Config(
                "genre_separator must not be empty".to_string(),
            ));
        }
        if parse_hex_color(&self.histogram_color).is_none() {
            return Err(AnalysisError::Config(format!(
                "Invalid histogram_color '{}'",
                self.histogram_color
            )));
        }
        for palette in [&self.bar_palette, &self.genre_palette] {
            if PALETTE_REGISTRY.get(palette).is_none() {
                return Err(AnalysisError::Config(format!(
                    "Unknown palette '{}', available: {}",
                    palette,
                    PALETTE_REGISTRY.names().join(", ")
                )));
            }
        }
        for kind in ChartKind::ALL {
            self.sizes.get(kind).validate()?;
        }
        Ok(())
    }

    /// Fill color for the rating histogram
    pub fn histogram_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.histogram_color).unwrap_or([0, 0, 255])
    }
}
