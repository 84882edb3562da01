use thiserror::Error;

/// Everything that can go wrong between building a request and handing back a parsed forecast.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The city/kind combination cannot be turned into a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP call itself failed, or the body was not JSON.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream document is missing a required field or has the wrong shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// API key or base URL is not configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, FetchError::InvalidRequest(_))
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, FetchError::MalformedResponse(_))
    }
}
