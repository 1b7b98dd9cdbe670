//! Error types for the price client.

/// Errors that can occur when requesting a quote.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The access token was rejected.
    #[error("Access token rejected (HTTP {status})")]
    Unauthorized { status: u16 },
    /// The body parsed but does not look like a quote.
    #[error("Invalid quote payload: {0}")]
    InvalidPayload(String),
    /// No access token is configured, so no request was sent.
    #[error("No access token configured")]
    MissingToken,
    /// The base URL or request path could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Coarse failure class used as a structured log field.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport",
            Error::HttpStatus { .. } | Error::Unauthorized { .. } => "protocol",
            Error::InvalidPayload(_) => "shape",
            Error::MissingToken | Error::InvalidUrl(_) => "config",
        }
    }
}
