use thiserror::Error;

/// Result type alias for Datadog Events operations
pub type Result<T> = std::result::Result<T, DatadogEventsError>;

/// Errors that can occur when sending events to Datadog
#[derive(Debug, Error)]
pub enum DatadogEventsError {
    /// No API key was configured before sending
    #[error("Datadog API key was not set")]
    MissingApiKey,

    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// The configured domain does not form a valid events URL
    #[error("Invalid events API endpoint: {0}")]
    Endpoint(#[source] url::ParseError),

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Datadog rejected the API key (HTTP 403)
    ///
    /// The status code is authoritative; the response body is ignored.
    #[error("Invalid API Key provided")]
    InvalidApiKey,

    /// Datadog returned an error response with an `errors` list
    ///
    /// The message is the list joined with `", "`.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Joined `errors` list from the response body
        message: String,
    },

    /// Any other non-success response, propagated unmodified
    #[error(transparent)]
    Status(reqwest::Error),

    /// A success response whose body was not valid JSON
    #[error("Failed to decode API response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl DatadogEventsError {
    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Server errors (5xx status codes)
    ///
    /// This crate never retries on its own; the classification is for callers
    /// that wrap sends in their own retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_connect() || err.is_timeout()
            }
            Self::Api { status, .. } => *status >= 500,
            Self::Status(err) => err.status().is_some_and(|status| status.is_server_error()),
            _ => false,
        }
    }
}
