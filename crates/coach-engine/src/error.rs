//! Error types for coaching engine operations

use thiserror::Error;

/// Engine-specific errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Remote workflow endpoint returned a failure
    #[error("Workflow error for {analyzer}: {reason}")]
    WorkflowFailed { analyzer: String, reason: String },

    /// Analyzer did not complete within the configured timeout
    #[error("Analyzer {0} timed out")]
    AnalyzerTimeout(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Convert EngineError to coach_core::Error
impl From<EngineError> for coach_core::Error {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::WorkflowFailed { .. } | EngineError::AnalyzerTimeout(_) => {
                coach_core::Error::AnalyzerUnavailable(err.to_string())
            }
            other => coach_core::Error::AnalysisFailed(other.to_string()),
        }
    }
}

/// Convert coach_core::Error to EngineError
impl From<coach_core::Error> for EngineError {
    fn from(err: coach_core::Error) -> Self {
        EngineError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::WorkflowFailed {
            analyzer: "offer".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Workflow error for offer: connection refused");

        let err = EngineError::AnalyzerTimeout("financial".to_string());
        assert_eq!(err.to_string(), "Analyzer financial timed out");
    }

    #[test]
    fn test_error_conversion() {
        let engine_err = EngineError::AnalyzerTimeout("psychology".to_string());
        let core_err: coach_core::Error = engine_err.into();

        match core_err {
            coach_core::Error::AnalyzerUnavailable(msg) => {
                assert!(msg.contains("psychology"));
            }
            _ => panic!("Expected AnalyzerUnavailable variant"),
        }
    }
}
