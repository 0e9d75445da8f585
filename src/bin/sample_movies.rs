//! Sample dataset generator
//!
//! Writes a small deterministic IMDB-shaped CSV so the chart binary can be
//! tried without the real dataset. A few rows carry missing or malformed
//! revenue/runtime values to exercise the cleaning step.
//!
//! Usage:
//! ```bash
//! cargo run --bin sample_movies -- --rows 200 --output sample_movies.csv
//! cargo run --bin movie_charts -- sample_movies.csv
//! ```

use anyhow::Context;
use clap::Parser;
use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const GENRES: [&str; 12] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Sci-Fi",
    "Thriller",
];

const WORDS: [&str; 10] = [
    "Silent", "Crimson", "Last", "Hidden", "Broken", "Golden", "Distant", "Wild", "Iron", "Lost",
];

const NOUNS: [&str; 8] = [
    "Horizon", "Kingdom", "Signal", "River", "Empire", "Garden", "Frontier", "Echo",
];

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic IMDB-style movie CSV")]
struct Args {
    /// Number of movies to generate
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Output CSV path
    #[arg(short, long, default_value = "sample_movies.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let mut df = sample_frame(args.rows)?;

    let mut file = File::create(&args.output)
        .with_context(|| format!("Could not create {}", args.output.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to write sample CSV")?;

    info!(rows = args.rows, path = %args.output.display(), "sample dataset written");
    Ok(())
}

/// Build `rows` movies whose fields cycle through fixed tables
fn sample_frame(rows: usize) -> PolarsResult<DataFrame> {
    let mut rank = Vec::with_capacity(rows);
    let mut title = Vec::with_capacity(rows);
    let mut genre = Vec::with_capacity(rows);
    let mut year = Vec::with_capacity(rows);
    let mut runtime = Vec::with_capacity(rows);
    let mut rating = Vec::with_capacity(rows);
    let mut votes = Vec::with_capacity(rows);
    let mut revenue = Vec::with_capacity(rows);

    for i in 0..rows {
        rank.push(i as i64 + 1);
        title.push(format!(
            "The {} {} {}",
            WORDS[i % WORDS.len()],
            NOUNS[(i / WORDS.len()) % NOUNS.len()],
            i / (WORDS.len() * NOUNS.len()) + 1
        ));

        let n_genres = 1 + i % 3;
        let genres: Vec<&str> = (0..n_genres)
            .map(|g| GENRES[(i * 5 + g * 7) % GENRES.len()])
            .collect();
        genre.push(genres.join(","));

        year.push(2006 + (i % 11) as i64);
        // Runtime drifts upward with year; every 17th value is malformed
        runtime.push(if i % 17 == 16 {
            "n/a".to_string()
        } else {
            (85 + (i * 13) % 70 + (i % 11) * 2).to_string()
        });
        rating.push(((19 + (i * 37) % 71) as f64) / 10.0);
        votes.push(((i * 7919) % 500_000 + 1_000) as i64);
        // Roughly one in nine movies has no reported revenue
        revenue.push(if i % 9 == 4 {
            None
        } else {
            Some(((i * 104_729) % 90_000) as f64 / 100.0)
        });
    }

    df! {
        "Rank" => rank,
        "Title" => title,
        "Genre" => genre,
        "Year" => year,
        "Runtime (Minutes)" => runtime,
        "Rating" => rating,
        "Votes" => votes,
        "Revenue (Millions)" => revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_charts::movies::data::clean_movies;

    #[test]
    fn test_sample_frame_cleans() {
        let df = sample_frame(40).unwrap();
        assert_eq!(df.height(), 40);

        let cleaned = clean_movies(df).unwrap();
        // Rows 16 and 33 carry "n/a" runtimes
        assert_eq!(cleaned.column("Runtime (Minutes)").unwrap().null_count(), 2);
        // Rows 4, 13, 22, 31 have no revenue
        assert_eq!(cleaned.column("Revenue (Millions)").unwrap().null_count(), 4);
    }
}
