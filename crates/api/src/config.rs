use std::path::{Path, PathBuf};
use std::time::Duration;

use safewatch_core::error::CoreError;
use safewatch_core::safety_config::SafetyConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the TMDb API key have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Optional JSON file overriding the built-in safety rules.
    pub safety_rules_path: Option<PathBuf>,
    pub tmdb: TmdbSettings,
    pub embed: EmbedSettings,
}

/// Metadata catalog connection settings.
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    /// Upper bound on a single catalog request.
    pub timeout: Duration,
}

/// Embed host connection settings.
#[derive(Debug, Clone)]
pub struct EmbedSettings {
    pub base_url: String,
    pub user_agent: String,
    /// `None` leaves the fetch bounded only by the server request timeout.
    pub timeout: Option<Duration>,
}

/// Default catalog request timeout in seconds.
const DEFAULT_TMDB_TIMEOUT_SECS: u64 = 5;

/// Default CORS allow-list: local static pages and `file://` (origin `null`).
const DEFAULT_CORS_ORIGINS: &str = "http://localhost,null,http://127.0.0.1:5500";

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `3000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost,null,http://127.0.0.1:5500` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `SAFETY_RULES_PATH`    | unset (built-in rules)                        |
    ///
    /// See [`TmdbSettings::from_env`] and [`EmbedSettings::from_env`] for the
    /// upstream settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let safety_rules_path = std::env::var("SAFETY_RULES_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            safety_rules_path,
            tmdb: TmdbSettings::from_env(),
            embed: EmbedSettings::from_env(),
        }
    }

    /// Build the scoring configuration, from `safety_rules_path` if set.
    pub fn load_safety_config(&self) -> Result<SafetyConfig, CoreError> {
        match &self.safety_rules_path {
            Some(path) => load_safety_rules_file(path),
            None => Ok(SafetyConfig::default()),
        }
    }
}

impl TmdbSettings {
    /// | Env Var             | Required | Default                        |
    /// |---------------------|----------|--------------------------------|
    /// | `TMDB_API_KEY`      | **yes**  | --                             |
    /// | `TMDB_BASE_URL`     | no       | `https://api.themoviedb.org/3` |
    /// | `TMDB_LANGUAGE`     | no       | `en-US`                        |
    /// | `TMDB_TIMEOUT_SECS` | no       | `5`                            |
    ///
    /// # Panics
    ///
    /// Panics if `TMDB_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("TMDB_API_KEY").expect("TMDB_API_KEY must be set in the environment");
        assert!(!api_key.trim().is_empty(), "TMDB_API_KEY must not be empty");

        let timeout_secs: u64 = std::env::var("TMDB_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TMDB_TIMEOUT_SECS.to_string())
            .parse()
            .expect("TMDB_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url: std::env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| safewatch_tmdb::DEFAULT_BASE_URL.into()),
            language: std::env::var("TMDB_LANGUAGE")
                .unwrap_or_else(|_| safewatch_tmdb::DEFAULT_LANGUAGE.into()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl EmbedSettings {
    /// | Env Var              | Default                          |
    /// |----------------------|----------------------------------|
    /// | `EMBED_BASE_URL`     | `https://vidsrc.to/embed/movie`  |
    /// | `EMBED_USER_AGENT`   | `Mozilla/5.0`                    |
    /// | `EMBED_TIMEOUT_SECS` | unset                            |
    pub fn from_env() -> Self {
        let timeout = std::env::var("EMBED_TIMEOUT_SECS").ok().map(|v| {
            Duration::from_secs(v.parse().expect("EMBED_TIMEOUT_SECS must be a valid u64"))
        });

        Self {
            base_url: std::env::var("EMBED_BASE_URL")
                .unwrap_or_else(|_| safewatch_embed::DEFAULT_BASE_URL.into()),
            user_agent: std::env::var("EMBED_USER_AGENT")
                .unwrap_or_else(|_| safewatch_embed::DEFAULT_USER_AGENT.into()),
            timeout,
        }
    }
}

fn load_safety_rules_file(path: &Path) -> Result<SafetyConfig, CoreError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Internal(format!(
            "cannot read safety rules from {}: {e}",
            path.display()
        ))
    })?;
    SafetyConfig::from_json_str(&json)
}
