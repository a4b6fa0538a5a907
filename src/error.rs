// error.rs

use thiserror::Error;

/// Failures of a single evaluation cycle. None of these are fatal to the service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// Input that the math cannot handle, e.g. non-positive humidity.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Outdoor weather source failed or timed out.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Payload was not JSON or lacked a required field.
    #[error("malformed message: {0}")]
    MalformedMessage(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(value: reqwest::Error) -> Self {
        BridgeError::UpstreamUnavailable(value.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(value: serde_json::Error) -> Self {
        BridgeError::MalformedMessage(value.to_string())
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

// EOF
