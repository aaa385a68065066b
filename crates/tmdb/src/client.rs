use reqwest::Client;
use safewatch_core::movie::{MovieId, MovieMetadata};

use crate::error::{TmdbError, UNKNOWN_TMDB_ERROR};
use crate::models::{ErrorBody, MovieDetail};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";

pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    /// Create a TmdbClient with a reqwest Client.
    ///
    /// Request timeouts are whatever `client` was built with.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Point the client at a different API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get movie details with release certifications.
    ///
    /// GET /movie/{movie_id}?append_to_response=releases
    pub async fn get_movie(&self, movie_id: MovieId) -> crate::Result<MovieDetail> {
        let url = self.url(&format!("/movie/{movie_id}"));
        tracing::debug!(%movie_id, "Fetching TMDb movie details");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
                ("append_to_response", "releases"),
            ])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Fetch a movie and convert it into the scorer's input model.
    pub async fn get_movie_metadata(&self, movie_id: MovieId) -> crate::Result<MovieMetadata> {
        self.get_movie(movie_id).await.map(MovieMetadata::from)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: status_message(&body),
            });
        }

        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

/// Extract `status_message` from a TMDb error body, tolerating any payload.
fn status_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.status_message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UNKNOWN_TMDB_ERROR.to_string())
}
