//! Error types for coach-core

use thiserror::Error;

/// Result type alias for coach-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for analyzer operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Analyzer could not be reached or failed mid-run
    #[error("Analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),

    /// Analysis processing failed
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}
