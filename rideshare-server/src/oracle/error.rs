//! Time oracle error types.

/// Errors from a single travel-time lookup.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// No API key was configured
    #[error("missing credentials: GOOGLE_API_KEY is not set")]
    CredentialsMissing,

    /// HTTP request failed (network error, timeout, etc.)
    ///
    /// The request URL is stripped: it carries the API key.
    #[error("HTTP error: {0}")]
    Transport(reqwest::Error),

    /// HTTP response had a non-success status code
    #[error("HTTP status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The API answered but reported a non-OK request status
    #[error("distance matrix status {status}: {message}")]
    ApiStatus { status: String, message: String },

    /// The response did not have the expected shape
    #[error("malformed response: {message}")]
    MalformedResponse {
        message: String,
        body: Option<String>,
    },

    /// The API found no route between the two points
    #[error("no route found (element status {status})")]
    NoRouteFound { status: String },
}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        OracleError::Transport(e.without_url())
    }
}

impl OracleError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        OracleError::MalformedResponse {
            message: message.into(),
            body: None,
        }
    }
}
