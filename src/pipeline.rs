//! Chart generation pipeline
//!
//! The pipeline:
//! 1. Loads and cleans the movie CSV
//! 2. Logs a dataset summary
//! 3. Prepares the series for each of the five charts
//! 4. Renders every chart on a blocking task and collects the written files

use crate::charts::{render_chart, ChartData, ChartKind, ChartResult, ChartSpec};
use crate::config::{AnalysisConfig, OutputFormat};
use crate::memprof;
use crate::movies::data::{DataSummary, RATING, REVENUE, TITLE};
use crate::movies::error::Result;
use crate::movies::palettes::{palette_colors, series_color};
use crate::movies::{load_movies, stats};
use futures::future::try_join_all;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::{info, warn};

/// Generate every chart described by `config`
///
/// Results are returned in chart order. The first chart that fails to
/// render fails the whole run.
pub async fn generate_charts(config: &AnalysisConfig) -> Result<Vec<ChartResult>> {
    let m0 = memprof::checkpoint("generate_charts START");
    let t0 = memprof::time_start("generate_charts");

    std::fs::create_dir_all(&config.output_dir)?;

    info!("[1/3] Loading dataset...");
    let movies = load_movies(&config.input)?;
    let summary = DataSummary::from_frame(&movies)?;
    info!("  {}", summary);
    let m1 = memprof::delta("After load_movies", m0);
    let t1 = memprof::time_delta("After load_movies", t0, t0);

    info!("[2/3] Preparing chart data...");
    let prepared = prepare_charts(&movies, config)?;
    for (spec, data) in &prepared {
        if data.is_empty() {
            warn!(chart = spec.kind.key(), "no data, rendering empty axes");
        }
    }
    drop(movies);
    let _ = memprof::delta("After prepare_charts", m1);
    let t2 = memprof::time_delta("After prepare_charts", t0, t1);

    info!(
        "[3/3] Rendering {} chart(s) to {}...",
        prepared.len(),
        config.output_dir.display()
    );
    let format = config.output_format;
    let tasks = prepared.into_iter().map(|(spec, data)| {
        let path = config.output_dir.join(spec.file_name(format));
        tokio::task::spawn_blocking(move || render_to_file(spec, data, path, format))
    });

    let results = try_join_all(tasks)
        .await?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    let _ = memprof::time_delta("After rendering", t0, t2);
    info!("Chart generation complete");
    Ok(results)
}

/// Build the spec and data for every chart, in `ChartKind::ALL` order
pub fn prepare_charts(
    movies: &DataFrame,
    config: &AnalysisConfig,
) -> Result<Vec<(ChartSpec, ChartData)>> {
    ChartKind::ALL
        .into_iter()
        .map(|kind| {
            let data = prepare_chart_data(kind, movies, config)?;
            Ok((ChartSpec::for_kind(kind, config), data))
        })
        .collect()
}

fn prepare_chart_data(
    kind: ChartKind,
    movies: &DataFrame,
    config: &AnalysisConfig,
) -> Result<ChartData> {
    let data = match kind {
        ChartKind::RatingDistribution => {
            let ratings = stats::column_values(movies, RATING)?;
            let bins = stats::histogram(&ratings, config.histogram_bins);
            let density = if config.kde {
                stats::gaussian_kde(&ratings, config.kde_points).map(|mut curve| {
                    let bin_width = bins.first().map(|b| b.width()).unwrap_or(1.0);
                    stats::scale_to_counts(&mut curve, ratings.len(), bin_width);
                    curve
                })
            } else {
                None
            };
            ChartData::Histogram {
                bins,
                density,
                color: config.histogram_rgb(),
            }
        }
        ChartKind::TopRevenue => {
            let bars = stats::top_by(movies, REVENUE, TITLE, config.top_n)?;
            let colors = palette_colors(&config.bar_palette, bars.len());
            ChartData::HorizontalBars { bars, colors }
        }
        ChartKind::RatingVsRevenue => ChartData::Scatter {
            points: stats::rating_revenue_pairs(movies)?,
            color: series_color(0),
        },
        ChartKind::GenreCounts => {
            let bars: Vec<(String, f64)> = stats::genre_counts(movies, &config.genre_separator)?
                .into_iter()
                .map(|(genre, count)| (genre, count as f64))
                .collect();
            let colors = palette_colors(&config.genre_palette, bars.len());
            ChartData::HorizontalBars { bars, colors }
        }
        ChartKind::RuntimeByYear => ChartData::Line {
            points: stats::mean_runtime_by_year(movies)?
                .into_iter()
                .map(|(year, runtime)| (year as f64, runtime))
                .collect(),
            color: series_color(0),
        },
    };
    Ok(data)
}

/// Render one chart and report what was written
fn render_to_file(
    spec: ChartSpec,
    data: ChartData,
    path: PathBuf,
    format: OutputFormat,
) -> Result<ChartResult> {
    let t0 = memprof::time_start(&spec.file_stem);
    render_chart(&spec, &data, &path, format)?;
    let bytes = std::fs::metadata(&path)?.len();
    let _ = memprof::time_delta(&format!("Rendered {}", spec.file_stem), t0, t0);
    info!(path = %path.display(), bytes, "✓ {}", spec.title);

    Ok(ChartResult {
        kind: spec.kind,
        path,
        width: spec.size.width,
        height: spec.size.height,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::load_movies_from_bytes;

    const CSV: &str = "\
Rank,Title,Genre,Year,Runtime (Minutes),Rating,Revenue (Millions)
1,Alpha,\"Action,Sci-Fi\",2014,121,8.1,333.13
2,Beta,\"Adventure,Mystery,Sci-Fi\",2012,124,7.0,126.46
3,Gamma,\"Horror,Thriller\",2016,117,7.3,138.12
4,Delta,\"Animation,Comedy,Family\",2016,108,7.2,270.32
5,Epsilon,\"Action,Adventure,Fantasy\",2016,123,6.2,
6,Zeta,\"Action,Adventure,Fantasy\",2016,103,6.1,325.02
";

    fn movies() -> DataFrame {
        load_movies_from_bytes(CSV.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_prepare_charts_order_and_names() {
        let config = AnalysisConfig::default();
        let prepared = prepare_charts(&movies(), &config).unwrap();
        let stems: Vec<&str> = prepared.iter().map(|(s, _)| s.file_stem.as_str()).collect();
        assert_eq!(
            stems,
            vec![
                "distribution_of_ratings",
                "top_10_movies_by_revenue",
                "rating_vs_revenue",
                "count_of_movies_by_genre",
                "average_runtime_by_year",
            ]
        );
    }

    #[test]
    fn test_prepare_charts_contents() {
        let config = AnalysisConfig {
            top_n: 3,
            ..Default::default()
        };
        let prepared = prepare_charts(&movies(), &config).unwrap();

        match &prepared[0].1 {
            ChartData::Histogram {
                bins,
                density,
                color,
            } => {
                assert_eq!(bins.len(), 10);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
                assert_eq!(density.as_ref().map(|d| d.len()), Some(200));
                assert_eq!(*color, [0, 0, 255]);
            }
            other => panic!("expected histogram, got {:?}", other),
        }

        match &prepared[1].1 {
            ChartData::HorizontalBars { bars, colors } => {
                let titles: Vec<&str> = bars.iter().map(|b| b.0.as_str()).collect();
                assert_eq!(titles, vec!["Alpha", "Zeta", "Delta"]);
                assert_eq!(colors.len(), 3);
            }
            other => panic!("expected bars, got {:?}", other),
        }

        // Epsilon has no revenue
        assert_eq!(prepared[2].1.len(), 5);

        match &prepared[3].1 {
            ChartData::HorizontalBars { bars, .. } => {
                assert_eq!(bars[0], ("Action".to_string(), 3.0));
                assert_eq!(bars[1], ("Adventure".to_string(), 3.0));
                assert_eq!(bars.len(), 10);
            }
            other => panic!("expected bars, got {:?}", other),
        }

        match &prepared[4].1 {
            ChartData::Line { points, .. } => {
                assert_eq!(points, &vec![(2012.0, 124.0), (2014.0, 121.0), (2016.0, 112.75)]);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_kde_disabled() {
        let config = AnalysisConfig {
            kde: false,
            ..Default::default()
        };
        let prepared = prepare_charts(&movies(), &config).unwrap();
        assert!(matches!(
            &prepared[0].1,
            ChartData::Histogram { density: None, .. }
        ));
    }
}
