//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure reported by a [`Transport`](super::traits::Transport) before any
/// response status was received (connectivity, timeout, TLS, ...)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportFailure(pub String);

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        TransportFailure(err.to_string())
    }
}

/// Classified failure of a single request execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Connectivity or timeout failure, not distinguished further
    #[error("network error: {0}")]
    Transport(String),

    /// Server answered with a non-success status code
    #[error("server returned HTTP status {status}")]
    Http { status: u16 },

    /// Body does not conform to the expected response shape
    #[error("could not decode response: {0}")]
    Decoding(String),

    /// A URL could not be built or parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<TransportFailure> for RequestError {
    fn from(failure: TransportFailure) -> Self {
        RequestError::Transport(failure.0)
    }
}

/// Error returned by a fetch strategy
///
/// Strategies forward the executor's classification untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(transparent)]
pub struct FetchError(#[from] pub RequestError);

impl FetchError {
    /// The underlying request classification
    pub fn kind(&self) -> &RequestError {
        &self.0
    }

    /// Human-readable message shown by the presentation layer
    pub fn user_message(&self) -> String {
        format!("Error fetching articles: {}", self.0)
    }
}

/// Main error type for client setup and state container operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Channel send errors
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Channel receive errors
    #[error("Channel receive error: {0}")]
    ChannelReceive(String),
}
