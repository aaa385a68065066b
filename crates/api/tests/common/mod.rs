#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get as route_get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use safewatch_api::config::{EmbedSettings, ServerConfig, TmdbSettings};
use safewatch_api::router::build_app_router;
use safewatch_api::state::AppState;

/// API key the fake catalog accepts.
pub const TEST_API_KEY: &str = "test-key";

/// A base URL nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Movie ids understood by the fake catalog.
pub const MOVIE_CAUTION: u64 = 550;
pub const MOVIE_CLEAN: u64 = 603;
pub const MOVIE_SLOW: u64 = 700;
pub const MOVIE_UNAVAILABLE: u64 = 701;
pub const MOVIE_MALFORMED: u64 = 702;

/// Page ids understood by the fake embed host.
pub const PAGE_WITH_PLAYER: u64 = 1;
pub const PAGE_WITHOUT_PLAYER: u64 = 2;
pub const PAGE_SERVER_ERROR: u64 = 3;
pub const PAGE_PLAYER_ON_404: u64 = 4;

pub const PLAYER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Player</title>
  <script src="https://ads.example/loader.js"></script>
  <script>window.onload = function () { window.open('https://pop.example'); };</script>
</head>
<body onclick="openPopunder()">
  <div id="ad-top">Win a prize!</div>
  <div class="popup-overlay">Click here</div>
  <div class="floating-ad">Float</div>
  <main id="player-root" onmouseover="track()">
    <iframe src="https://player.example/e/550" allowfullscreen></iframe>
  </main>
  <script>track()</script>
</body>
</html>"#;

/// Build a test `ServerConfig` pointing at the given upstream roots.
pub fn test_config(tmdb_base_url: &str, embed_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![
            "http://localhost".to_string(),
            "null".to_string(),
            "http://127.0.0.1:5500".to_string(),
        ],
        request_timeout_secs: 30,
        safety_rules_path: None,
        tmdb: TmdbSettings {
            api_key: TEST_API_KEY.to_string(),
            base_url: tmdb_base_url.to_string(),
            language: "en-US".to_string(),
            timeout: Duration::from_secs(5),
        },
        embed: EmbedSettings {
            base_url: embed_base_url.to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout: None,
        },
    }
}

/// Build the full application router with all middleware layers, exactly
/// as `main.rs` does.
pub fn build_test_app(config: ServerConfig) -> Router {
    let safety = config.load_safety_config().unwrap();
    let state = AppState::new(config, safety).unwrap();
    build_app_router(state)
}

/// Start the fake upstreams and return an app wired to them.
pub async fn app_with_fake_upstreams() -> Router {
    let base = spawn_upstream(fake_upstream()).await;
    build_test_app(test_config(
        &format!("{base}/3"),
        &format!("{base}/embed"),
    ))
}

/// Serve `router` on an ephemeral local port, returning its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Fake TMDb (`/3/movie/{id}`) and embed host (`/embed/{id}`).
pub fn fake_upstream() -> Router {
    Router::new()
        .route("/3/movie/{id}", route_get(fake_tmdb_movie))
        .route("/embed/{id}", route_get(fake_embed_page))
}

async fn fake_tmdb_movie(
    Path(id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
                "success": false
            })),
        )
            .into_response();
    }
    if params.get("append_to_response").map(String::as_str) != Some("releases") {
        return (StatusCode::BAD_REQUEST, "releases not requested").into_response();
    }

    match id {
        MOVIE_CAUTION => Json(json!({
            "id": 550,
            "title": "Night Siege",
            "overview": "A war breaks out.",
            "genres": [{ "id": 27, "name": "Horror" }, { "id": 18, "name": "Drama" }],
            "releases": { "countries": [
                { "iso_3166_1": "GB", "certification": "15" },
                { "iso_3166_1": "US", "certification": "PG-13" }
            ]}
        }))
        .into_response(),
        MOVIE_CLEAN => Json(json!({
            "id": 603,
            "title": "Meadow Friends",
            "overview": "Two rabbits plant a garden.",
            "genres": [{ "id": 16, "name": "Animation" }]
        }))
        .into_response(),
        MOVIE_SLOW => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "id": 700, "title": "Slow" })).into_response()
        }
        MOVIE_UNAVAILABLE => {
            (StatusCode::SERVICE_UNAVAILABLE, "upstream maintenance").into_response()
        }
        MOVIE_MALFORMED => Json(json!({ "id": "seven hundred two" })).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status_code": 34,
                "status_message": "The resource you requested could not be found.",
                "success": false
            })),
        )
            .into_response(),
    }
}

async fn fake_embed_page(Path(id): Path<u64>, headers: HeaderMap) -> Response {
    let browser_like = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.starts_with("Mozilla/"));
    if !browser_like {
        return (StatusCode::FORBIDDEN, Html("<h1>Blocked</h1>")).into_response();
    }

    match id {
        PAGE_WITH_PLAYER => Html(PLAYER_PAGE).into_response(),
        PAGE_WITHOUT_PLAYER => {
            Html("<html><body><h1>Coming soon</h1><script>ad()</script></body></html>")
                .into_response()
        }
        PAGE_SERVER_ERROR => (StatusCode::BAD_GATEWAY, "bad gateway").into_response(),
        PAGE_PLAYER_ON_404 => (
            StatusCode::NOT_FOUND,
            Html("<body><video src=\"https://cdn.example/fallback.mp4\"></video></body>"),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, Html("<h1>Not Found</h1>")).into_response(),
    }
}

/// Send a GET request through the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The response `content-type`, or an empty string.
pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
