use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use safewatch_core::error::CoreError;
use safewatch_core::sanitizer::SanitizeError;
use safewatch_embed::EmbedError;
use safewatch_tmdb::TmdbError;
use serde_json::json;

/// HTML body for a page without a usable player.
pub const STREAM_NOT_FOUND_HTML: &str =
    "<h1>Error</h1><p>Stream source is unstable or content not indexed.</p>";

/// HTML body for embed host transport failures.
pub const STREAM_TRANSPORT_HTML: &str = "<h1>Error Loading Clean Stream</h1><p>The streaming source is unstable or the network failed on the server side.</p>";

/// HTML body for a malformed movie id on the stream route.
pub const STREAM_BAD_REQUEST_HTML: &str = "<h1>Error</h1><p>Invalid movie id.</p>";

/// Failures of the clean-stream pipeline. Rendered as HTML.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Invalid movie id: {0}")]
    InvalidMovieId(CoreError),

    /// Fetching the embed page failed (transport or 5xx).
    #[error(transparent)]
    Fetch(#[from] EmbedError),

    /// The page was fetched but could not be cleaned into a playable page.
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),
}

/// Application-level error type for HTTP handlers.
///
/// Catalog and validation failures render as JSON `{ error, details }`;
/// stream failures render as HTML because that route serves `text/html`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `safewatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The metadata catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] TmdbError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => core_response(core),
            AppError::Catalog(err) => catalog_response(err),
            AppError::Stream(err) => stream_response(err),
        }
    }
}

fn json_error(status: StatusCode, error: &str, details: String) -> Response {
    let body = json!({
        "error": error,
        "details": details,
    });
    (status, axum::Json(body)).into_response()
}

fn core_response(err: CoreError) -> Response {
    match err {
        CoreError::Validation(msg) => {
            tracing::warn!(error = %msg, "Rejected request");
            json_error(StatusCode::BAD_REQUEST, "Invalid request.", msg)
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error.",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn catalog_response(err: TmdbError) -> Response {
    tracing::error!(error = %err, "Safety check failed");
    let error = match &err {
        TmdbError::Api { .. } => "TMDb Data Fetch Failed.",
        TmdbError::Timeout(_) => "Timed out waiting for TMDb.",
        TmdbError::Request(_) => "Network issue (DNS/Firewall) connecting to TMDb.",
        TmdbError::Json { .. } => "TMDb returned an unexpected payload.",
    };
    json_error(StatusCode::INTERNAL_SERVER_ERROR, error, err.to_string())
}

fn stream_response(err: StreamError) -> Response {
    let (status, body) = match &err {
        StreamError::InvalidMovieId(_) => {
            tracing::warn!(error = %err, "Rejected stream request");
            (StatusCode::BAD_REQUEST, STREAM_BAD_REQUEST_HTML)
        }
        StreamError::Sanitize(SanitizeError::PlayerNotFound) => {
            tracing::warn!("No player element in sanitized embed page");
            (StatusCode::NOT_FOUND, STREAM_NOT_FOUND_HTML)
        }
        StreamError::Fetch(_) | StreamError::Sanitize(SanitizeError::Html(_)) => {
            tracing::error!(error = %err, "Failed to fetch or clean embed page");
            (StatusCode::INTERNAL_SERVER_ERROR, STREAM_TRANSPORT_HTML)
        }
    };
    (status, Html(body)).into_response()
}
