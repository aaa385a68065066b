use std::sync::Arc;

use safewatch_core::safety_config::SafetyConfig;
use safewatch_embed::EmbedClient;
use safewatch_tmdb::TmdbClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Metadata catalog client (bounded by the catalog timeout).
    pub tmdb: Arc<TmdbClient>,
    /// Embed host client.
    pub embed: Arc<EmbedClient>,
    /// Scoring rules, loaded once.
    pub safety: Arc<SafetyConfig>,
}

impl AppState {
    /// Build the upstream HTTP clients from `config`.
    pub fn new(config: ServerConfig, safety: SafetyConfig) -> Result<Self, reqwest::Error> {
        let tmdb_http = reqwest::Client::builder()
            .timeout(config.tmdb.timeout)
            .build()?;
        let tmdb = TmdbClient::new(tmdb_http, config.tmdb.api_key.clone())
            .with_base_url(config.tmdb.base_url.clone())
            .with_language(config.tmdb.language.clone());

        let mut embed_http = reqwest::Client::builder();
        if let Some(timeout) = config.embed.timeout {
            embed_http = embed_http.timeout(timeout);
        }
        let embed = EmbedClient::new(embed_http.build()?)
            .with_base_url(config.embed.base_url.clone())
            .with_user_agent(config.embed.user_agent.clone());

        Ok(Self {
            config: Arc::new(config),
            tmdb: Arc::new(tmdb),
            embed: Arc::new(embed),
            safety: Arc::new(safety),
        })
    }
}
