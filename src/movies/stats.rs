//! Aggregations feeding the charts
//!
//! Numeric helpers (`histogram`, `gaussian_kde`) work on plain slices; the
//! frame-level helpers pull their series out of a cleaned movie DataFrame.

use super::data::{GENRE, RATING, REVENUE, RUNTIME, YEAR};
use super::error::Result;
use polars::prelude::*;

/// One equal-width histogram bin `[start, end)` (last bin closed)
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Bin `values` into `bins` equal-width bins spanning their min..max
///
/// Non-finite values are ignored. When every value is equal the range is
/// widened to `value ± 0.5`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = min_max(&finite);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + i as f64 * width,
            // Exact upper edge for the last bin
            end: if i + 1 == bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

/// Gaussian kernel density estimate evaluated on `points` evenly spaced
/// positions across the data range.
///
/// Bandwidth follows Scott's rule: `std * n^(-1/5)` with the sample standard
/// deviation. Returns `None` for fewer than two values or zero variance.
pub fn gaussian_kde(values: &[f64], points: usize) -> Option<Vec<(f64, f64)>> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    if n < 2 || points < 2 {
        return None;
    }

    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if std <= 0.0 || !std.is_finite() {
        return None;
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let (lo, hi) = min_max(&finite);
    let step = (hi - lo) / (points - 1) as f64;

    let curve = (0..points)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = finite
                .iter()
                .map(|xi| {
                    let z = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect();

    Some(curve)
}

/// Rescale a density curve so it overlays a count histogram
pub fn scale_to_counts(curve: &mut [(f64, f64)], n: usize, bin_width: f64) {
    let factor = n as f64 * bin_width;
    for point in curve.iter_mut() {
        point.1 *= factor;
    }
}

/// Non-null values of a Float64 column
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(df.column(name)?.f64()?.into_iter().flatten().collect())
}

/// Rows with the `n` largest `value_col` values, as `(label, value)` pairs
///
/// Rows with a missing value are dropped; ties keep their input order.
pub fn top_by(
    df: &DataFrame,
    value_col: &str,
    label_col: &str,
    n: usize,
) -> Result<Vec<(String, f64)>> {
    let top = df
        .clone()
        .lazy()
        .filter(col(value_col).is_not_null())
        .sort(
            [value_col],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(n.min(IdxSize::MAX as usize) as IdxSize)
        .select([col(label_col), col(value_col)])
        .collect()?;

    let labels = top.column(label_col)?.str()?;
    let values = top.column(value_col)?.f64()?;

    Ok(labels
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(label, value)| value.map(|v| (label.unwrap_or("").to_string(), v)))
        .collect())
}

/// Count movies per genre
///
/// Each `Genre` cell may list several genres separated by `separator`; every
/// listed genre counts once. Ordered by count descending, ties by first
/// appearance.
pub fn genre_counts(df: &DataFrame, separator: &str) -> Result<Vec<(String, usize)>> {
    const COUNT: &str = "count";

    let counts = df
        .clone()
        .lazy()
        .select([col(GENRE)
            .str()
            .split(lit(separator))
            .explode()
            .str()
            .strip_chars(lit(" \t"))
            .alias(GENRE)])
        .filter(col(GENRE).is_not_null().and(col(GENRE).neq(lit(""))))
        .group_by_stable([col(GENRE)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        // Stable sort keeps first-appearance order among equal counts
        .sort(
            [COUNT],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let genres = counts.column(GENRE)?.str()?;
    let totals = counts.column(COUNT)?.u64()?;

    Ok(genres
        .into_iter()
        .zip(totals.into_iter())
        .filter_map(|(genre, total)| Some((genre?.to_string(), total? as usize)))
        .collect())
}

/// Mean runtime per release year, ascending by year
pub fn mean_runtime_by_year(df: &DataFrame) -> Result<Vec<(i64, f64)>> {
    let by_year = df
        .clone()
        .lazy()
        .filter(col(YEAR).is_not_null().and(col(RUNTIME).is_not_null()))
        .group_by([col(YEAR)])
        .agg([col(RUNTIME).mean()])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    let years = by_year.column(YEAR)?.i64()?;
    let runtimes = by_year.column(RUNTIME)?.f64()?;

    Ok(years
        .into_iter()
        .zip(runtimes.into_iter())
        .filter_map(|(year, runtime)| Some((year?, runtime?)))
        .collect())
}

/// `(rating, revenue)` pairs for rows where both are present
pub fn rating_revenue_pairs(df: &DataFrame) -> Result<Vec<(f64, f64)>> {
    let ratings = df.column(RATING)?.f64()?;
    let revenues = df.column(REVENUE)?.f64()?;

    Ok(ratings
        .into_iter()
        .zip(revenues.into_iter())
        .filter_map(|(rating, revenue)| Some((rating?, revenue?)))
        .collect())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
