//! Movie Charts Library
//!
//! Loads an IMDB-style movie CSV and renders a fixed set of exploratory
//! charts. Used by the `movie_charts` and `sample_movies` binaries and the
//! integration tests.

pub mod charts;
pub mod cli;
pub mod config;
pub mod memprof;
pub mod movies;
pub mod pipeline;
