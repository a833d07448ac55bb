//! Error taxonomy for the prediction client

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the prediction client.
///
/// An empty prediction sequence is deliberately not represented here: the
/// single-record path resolves it locally with a caller-supplied default.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Network-level failure (connect, send, body read)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success HTTP status
    #[error("service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// No usable credential for the request
    #[error("credential error: {0}")]
    Credentials(String),

    /// The configured endpoint does not form a valid URL
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body was not the expected JSON shape
    #[error("malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Prediction count does not match the submitted instance count
    #[error("response carried {got} predictions for {expected} instances")]
    Misaligned { expected: usize, got: usize },

    /// A CSV record could not be parsed into a feature record
    #[error("invalid CSV record: {0}")]
    Csv(String),
}

impl PredictError {
    /// Whether the retry policy may re-send the request after this error.
    ///
    /// Only transport-level failures qualify; HTTP error statuses and
    /// body-shape errors are returned to the caller unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PredictError::Transport(_))
    }
}
