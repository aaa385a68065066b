pub mod health;
pub mod safety;
pub mod stream;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /safety-check/{movie_id}      child-safety report (JSON)
/// /clean-stream/{movie_id}      sanitized embed page (HTML)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(safety::router())
        .merge(stream::router())
}
