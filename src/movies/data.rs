//! Movie dataset loading and cleaning
//!
//! Reads the IMDB-style CSV with Polars and coerces the numeric columns the
//! charts depend on. Values that cannot be parsed become null rather than
//! failing the load.

use super::error::{AnalysisError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

pub const TITLE: &str = "Title";
pub const GENRE: &str = "Genre";
pub const RATING: &str = "Rating";
pub const REVENUE: &str = "Revenue (Millions)";
pub const RUNTIME: &str = "Runtime (Minutes)";
pub const YEAR: &str = "Year";

/// Columns that must be present for every chart to be produced
pub const REQUIRED_COLUMNS: [&str; 6] = [TITLE, GENRE, RATING, REVENUE, RUNTIME, YEAR];

/// Load and clean the movie CSV at `path`
pub fn load_movies(path: &Path) -> Result<DataFrame> {
    info!(path = %path.display(), "loading movie dataset");
    let bytes = std::fs::read(path)?;
    load_movies_from_bytes(bytes)
}

/// Load and clean movie CSV data already held in memory
///
/// Every column is read as a string so a malformed cell anywhere in the file
/// reaches `clean_movies` instead of failing the read.
pub fn load_movies_from_bytes(bytes: Vec<u8>) -> Result<DataFrame> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0));
    let raw = CsvReader::new(Cursor::new(bytes))
        .with_options(options)
        .finish()?;
    debug!(rows = raw.height(), columns = raw.width(), "raw CSV read");
    clean_movies(raw)
}

/// Verify required columns and coerce them to the types the charts expect
///
/// - `Rating`, `Revenue (Millions)`, `Runtime (Minutes)` → Float64
/// - `Year` → Int64
/// - `Title`, `Genre` → String
///
/// Casts are non-strict: malformed cells become null.
pub fn clean_movies(df: DataFrame) -> Result<DataFrame> {
    for name in REQUIRED_COLUMNS {
        if df.get_column_index(name).is_none() {
            return Err(AnalysisError::MissingColumn(name.to_string()));
        }
    }

    let cleaned = df
        .lazy()
        .with_columns([
            col(TITLE).cast(DataType::String),
            col(GENRE).cast(DataType::String),
            col(RATING).cast(DataType::Float64),
            col(REVENUE).cast(DataType::Float64),
            col(RUNTIME).cast(DataType::Float64),
            col(YEAR).cast(DataType::Int64),
        ])
        .collect()?;

    Ok(cleaned)
}

/// Summary statistics for a cleaned movie frame
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub total_rows: usize,
    pub missing_rating: usize,
    pub missing_revenue: usize,
    pub missing_runtime: usize,
    pub rating_range: Option<(f64, f64)>,
    pub year_range: Option<(i64, i64)>,
}

impl DataSummary {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let rating = df.column(RATING)?.f64()?;
        let year = df.column(YEAR)?.i64()?;

        let rating_range = match (rating.min(), rating.max()) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        };
        let year_range = match (year.min(), year.max()) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        };

        Ok(DataSummary {
            total_rows: df.height(),
            missing_rating: rating.null_count(),
            missing_revenue: df.column(REVENUE)?.null_count(),
            missing_runtime: df.column(RUNTIME)?.null_count(),
            rating_range,
            year_range,
        })
    }
}

impl std::fmt::Display for DataSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DataSummary {{ rows: {}, missing rating/revenue/runtime: {}/{}/{}",
            self.total_rows, self.missing_rating, self.missing_revenue, self.missing_runtime
        )?;
        if let Some((lo, hi)) = self.rating_range {
            write!(f, ", rating: [{:.1}, {:.1}]", lo, hi)?;
        }
        if let Some((lo, hi)) = self.year_range {
            write!(f, ", years: [{}, {}]", lo, hi)?;
        }
        write!(f, " }}")
    }
}
