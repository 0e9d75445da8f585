//! Movie dataset module
//!
//! Everything that knows about the movie table itself, independent of how
//! charts are drawn.
//!
//! Structure:
//! - `data.rs`: CSV loading, column coercion and dataset summary
//! - `stats.rs`: Aggregations (histogram, density, top-N, genre counts, yearly means)
//! - `palettes.rs`: Embedded color palettes
//! - `error.rs`: Error types

pub mod data;
pub mod error;
pub mod palettes;
pub mod stats;

// Re-exports for convenience
pub use data::{load_movies, load_movies_from_bytes, DataSummary};
pub use error::{AnalysisError, Result};
