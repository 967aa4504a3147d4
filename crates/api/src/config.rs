use std::path::PathBuf;

use nano_gemini::api::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Upper bound on one enhancement call in seconds (default: `45`).
    /// A call that runs longer fails and releases the enhancement slot.
    pub enhance_timeout_secs: u64,
    /// Directory holding the history and library files (default: `./data`).
    pub data_dir: PathBuf,
    /// Enhancement service settings; `None` disables enhancement.
    pub gemini: Option<GeminiConfig>,
}

/// Connection settings for the Gemini enhancement service.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                   |
    /// | `PORT`                 | `3000`                                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                                        |
    /// | `GEMINI_TIMEOUT_SECS`  | `45`                                        |
    /// | `DATA_DIR`             | `./data`                                    |
    /// | `GEMINI_API_KEY`       | unset (enhancement disabled)                |
    /// | `GEMINI_MODEL`         | `gemini-2.5-flash`                          |
    /// | `GEMINI_API_URL`       | `https://generativelanguage.googleapis.com` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let enhance_timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .map(|v| v.parse().expect("GEMINI_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_TIMEOUT.as_secs());

        let data_dir = std::env::var("DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();

        let gemini = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| GeminiConfig {
                api_key,
                model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
                api_url: std::env::var("GEMINI_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.into()),
            });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            enhance_timeout_secs,
            data_dir,
            gemini,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
