//! Sanitizing proxy for the streaming embed page.

use axum::extract::{Path, State};
use axum::response::Html;
use safewatch_core::movie::MovieId;
use safewatch_core::sanitizer::sanitize_embed_page;

use crate::error::{AppResult, StreamError};
use crate::state::AppState;

/// GET /api/clean-stream/{movie_id}
///
/// Relays the embed page with scripts, ad containers and pop-up handlers
/// removed. Responds 404 when no player survives, 500 when the host is
/// unreachable.
pub async fn clean_stream(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Html<String>> {
    let movie_id = MovieId::parse(&movie_id).map_err(StreamError::InvalidMovieId)?;

    let raw_html = state
        .embed
        .fetch_movie_page(movie_id)
        .await
        .map_err(StreamError::from)?;
    let page = sanitize_embed_page(&raw_html).map_err(StreamError::from)?;

    tracing::info!(
        %movie_id,
        player = page.player.as_str(),
        scripts_removed = page.scripts_removed,
        ad_elements_removed = page.ad_elements_removed,
        "Embed page sanitized"
    );

    Ok(Html(page.html))
}
