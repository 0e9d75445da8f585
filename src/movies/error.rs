use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur while loading the dataset or producing charts
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Filesystem error (missing input, unwritable output directory, ...)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or dataframe operation failed
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column the charts depend on is absent from the input
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Drawing backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// A rendering task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl<E> From<DrawingAreaErrorKind<E>> for AnalysisError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Render(err.to_string())
    }
}

/// Type alias for Results using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
