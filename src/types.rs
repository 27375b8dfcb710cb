// Shared error types

use reqwest::StatusCode;

/// Why a single analysis attempt failed.
///
/// Every variant collapses to the same user-visible message; the variant
/// itself only travels to the diagnostic channel.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("analysis service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed analysis response: {0}")]
    Decode(String),

    #[error("could not build multipart payload: {0}")]
    InvalidPart(String),

    #[error("analysis task aborted: {0}")]
    Aborted(String),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while turning a path into a [`crate::controller::SelectedFile`].
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a regular file")]
    NotAFile(String),
}
