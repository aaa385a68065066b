use axum::routing::get;
use axum::Router;

use crate::handlers::safety;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/safety-check/{movie_id}", get(safety::safety_check))
}
