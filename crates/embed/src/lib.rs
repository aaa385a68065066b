//! HTTP client for the third-party streaming embed host.
//!
//! Fetches the raw embed page for a movie so it can be sanitized before it
//! reaches the browser.

use reqwest::header::USER_AGENT;
use safewatch_core::movie::MovieId;

pub const DEFAULT_BASE_URL: &str = "https://vidsrc.to/embed/movie";

/// Browser-like user agent; the host blocks unidentified clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Errors from the embed host.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host answered with a 5xx status.
    #[error("Embed host error ({status}): {body}")]
    Upstream { status: u16, body: String },
}

pub struct EmbedClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl EmbedClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn page_url(&self, movie_id: MovieId) -> String {
        format!("{}/{}", self.base_url, movie_id)
    }

    /// Fetch the embed page HTML for `movie_id`.
    ///
    /// Any status below 500 is returned as-is so the caller can inspect the
    /// body; 5xx responses become [`EmbedError::Upstream`].
    pub async fn fetch_movie_page(&self, movie_id: MovieId) -> Result<String, EmbedError> {
        let url = self.page_url(movie_id);
        tracing::info!(%movie_id, %url, "Fetching embed page");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_server_error() {
            return Err(EmbedError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            tracing::warn!(%movie_id, status = status.as_u16(), "Embed host returned non-success status");
        }

        Ok(body)
    }
}
