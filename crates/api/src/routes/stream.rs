use axum::routing::get;
use axum::Router;

use crate::handlers::stream;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/clean-stream/{movie_id}", get(stream::clean_stream))
}
