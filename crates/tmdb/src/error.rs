/// Fallback when a TMDb error body carries no `status_message`.
pub const UNKNOWN_TMDB_ERROR: &str = "Unknown TMDb Error.";

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// Connection, DNS or TLS failure.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// No response within the client timeout.
    #[error("Request to TMDb timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// TMDb answered with a non-success status.
    #[error("TMDb responded with status {status_code}. Message: {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode TMDb response at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TmdbError::Timeout(err)
        } else {
            TmdbError::Request(err)
        }
    }
}
