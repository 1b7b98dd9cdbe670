//! Error types for the library layer.

use std::fmt;

/// Errors raised while setting up a feed. Per-cycle failures never surface
/// here; the fetcher absorbs them into synthetic quotes.
#[derive(Debug)]
pub enum FeedError {
    /// Building the underlying API client failed.
    Api(aurum_api::Error),
    /// A configuration value is unusable (e.g. a zero poll interval).
    InvalidConfig(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<aurum_api::Error> for FeedError {
    fn from(e: aurum_api::Error) -> Self {
        Self::Api(e)
    }
}
