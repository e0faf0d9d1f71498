use std::path::PathBuf;

use thiserror::Error;

use crate::models::ArtifactCoordinate;

/// Result type alias using [`AnalyzerError`].
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Failures that abort an analysis run.
///
/// Every variant is fatal; the orchestrator never retries. The "output
/// directory does not exist" case is deliberately *not* represented here —
/// it is a skip, not an error (see [`crate::orchestrator::RunOutcome`]).
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A user-supplied value is outside its recognized enumeration or range.
    /// The message enumerates the valid values.
    #[error("invalid {option}: {message}")]
    InvalidConfiguration { option: &'static str, message: String },

    /// A required artifact could not be fetched from any configured repository.
    #[error("could not resolve artifact {coordinate}: {cause:#}")]
    ResolutionFailure {
        coordinate: ArtifactCoordinate,
        cause: anyhow::Error,
    },

    /// Directory creation or report write failed.
    #[error("filesystem error at {path}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opaque failure surfaced by the analysis engine.
    #[error("analysis failed: {0:#}")]
    AnalysisFailure(anyhow::Error),
}

impl AnalyzerError {
    pub fn invalid_configuration(option: &'static str, message: impl Into<String>) -> Self {
        AnalyzerError::InvalidConfiguration {
            option,
            message: message.into(),
        }
    }
}
