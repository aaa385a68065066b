//! Child-safety report for a catalog title.

use axum::extract::{Path, State};
use axum::Json;
use safewatch_core::movie::MovieId;
use safewatch_core::safety::{compute_safety_report, ScanReport};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// JSON body of a successful safety check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheckResponse {
    pub movie_title: String,
    pub normalized_score: u32,
    pub summary: String,
    pub recommendation: String,
    pub advisory_notes: Vec<String>,
}

impl SafetyCheckResponse {
    pub fn new(movie_title: String, report: ScanReport) -> Self {
        Self {
            movie_title,
            normalized_score: report.normalized_score,
            summary: report.summary,
            recommendation: report.recommendation,
            advisory_notes: report.advisory_notes,
        }
    }
}

/// GET /api/safety-check/{movie_id}
///
/// Fetches the title from TMDb and scores it. Catalog failures surface as
/// 500 with `{ error, details }`; nothing is retried.
pub async fn safety_check(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<SafetyCheckResponse>> {
    let movie_id = MovieId::parse(&movie_id)?;

    let movie = state.tmdb.get_movie_metadata(movie_id).await?;
    let report = compute_safety_report(&movie, &state.safety);

    tracing::info!(
        %movie_id,
        title = %movie.title,
        score = report.normalized_score,
        tier = report.tier.as_str(),
        "Safety scan complete"
    );

    Ok(Json(SafetyCheckResponse::new(movie.title, report)))
}
