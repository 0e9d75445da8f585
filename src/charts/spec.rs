//! Chart catalogue: what each of the five charts is called, how it is
//! labelled and what data it carries.

use crate::config::{AnalysisConfig, ChartSize, OutputFormat};
use crate::movies::stats::HistogramBin;
use std::path::PathBuf;

/// The fixed set of charts produced for a dataset, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    RatingDistribution,
    TopRevenue,
    RatingVsRevenue,
    GenreCounts,
    RuntimeByYear,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::RatingDistribution,
        ChartKind::TopRevenue,
        ChartKind::RatingVsRevenue,
        ChartKind::GenreCounts,
        ChartKind::RuntimeByYear,
    ];

    /// Short key used for per-chart overrides (`--size genres=1400x800`)
    pub fn key(&self) -> &'static str {
        match self {
            ChartKind::RatingDistribution => "ratings",
            ChartKind::TopRevenue => "revenue",
            ChartKind::RatingVsRevenue => "scatter",
            ChartKind::GenreCounts => "genres",
            ChartKind::RuntimeByYear => "runtime",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
    }

    /// Output file name without extension
    pub fn file_stem(&self, top_n: usize) -> String {
        match self {
            ChartKind::RatingDistribution => "distribution_of_ratings".to_string(),
            ChartKind::TopRevenue => format!("top_{}_movies_by_revenue", top_n),
            ChartKind::RatingVsRevenue => "rating_vs_revenue".to_string(),
            ChartKind::GenreCounts => "count_of_movies_by_genre".to_string(),
            ChartKind::RuntimeByYear => "average_runtime_by_year".to_string(),
        }
    }

    pub fn title(&self, top_n: usize) -> String {
        match self {
            ChartKind::RatingDistribution => "Distribution of Movie Ratings".to_string(),
            ChartKind::TopRevenue => format!("Top {} Movies by Revenue", top_n),
            ChartKind::RatingVsRevenue => "Rating vs Revenue".to_string(),
            ChartKind::GenreCounts => "Count of Movies by Genre".to_string(),
            ChartKind::RuntimeByYear => "Average Runtime of Movies by Year".to_string(),
        }
    }

    /// (x-axis label, y-axis label)
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            ChartKind::RatingDistribution => ("Rating", "Number of Movies"),
            ChartKind::TopRevenue => ("Revenue (Millions)", "Movie Title"),
            ChartKind::RatingVsRevenue => ("Rating", "Revenue (Millions)"),
            ChartKind::GenreCounts => ("Count", "Genre"),
            ChartKind::RuntimeByYear => ("Year", "Runtime (Minutes)"),
        }
    }
}

/// Labels, file name and pixel size for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub file_stem: String,
    pub size: ChartSize,
}

impl ChartSpec {
    pub fn for_kind(kind: ChartKind, config: &AnalysisConfig) -> Self {
        let (x_label, y_label) = kind.axis_labels();
        ChartSpec {
            kind,
            title: kind.title(config.top_n),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            file_stem: kind.file_stem(config.top_n),
            size: config.sizes.get(kind),
        }
    }

    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.file_stem, format.extension())
    }
}

/// Prepared series for one chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Count histogram with an optional density curve already scaled to counts
    Histogram {
        bins: Vec<HistogramBin>,
        density: Option<Vec<(f64, f64)>>,
        color: [u8; 3],
    },
    /// Labelled horizontal bars, first bar drawn at the top
    HorizontalBars {
        bars: Vec<(String, f64)>,
        colors: Vec<[u8; 3]>,
    },
    Scatter {
        points: Vec<(f64, f64)>,
        color: [u8; 3],
    },
    /// Line through the points with a marker at each one
    Line {
        points: Vec<(f64, f64)>,
        color: [u8; 3],
    },
}

impl ChartData {
    /// Number of drawn marks (bins, bars or points)
    pub fn len(&self) -> usize {
        match self {
            ChartData::Histogram { bins, .. } => bins.len(),
            ChartData::HorizontalBars { bars, .. } => bars.len(),
            ChartData::Scatter { points, .. } | ChartData::Line { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A chart written to disk
#[derive(Debug, Clone)]
pub struct ChartResult {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_keys_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ChartKind::from_key(" Genres "), Some(ChartKind::GenreCounts));
        assert_eq!(ChartKind::from_key("pie"), None);
    }

    #[test]
    fn test_file_names_follow_top_n() {
        let config = AnalysisConfig {
            top_n: 5,
            ..Default::default()
        };
        let spec = ChartSpec::for_kind(ChartKind::TopRevenue, &config);
        assert_eq!(spec.title, "Top 5 Movies by Revenue");
        assert_eq!(spec.file_name(OutputFormat::Png), "top_5_movies_by_revenue.png");
        assert_eq!(spec.x_label, "Revenue (Millions)");
        assert_eq!(spec.size, ChartSize::new(1200, 600));

        let spec = ChartSpec::for_kind(ChartKind::RatingVsRevenue, &config);
        assert_eq!(spec.file_name(OutputFormat::Svg), "rating_vs_revenue.svg");
        assert_eq!(spec.size, ChartSize::new(800, 600));
    }
}
