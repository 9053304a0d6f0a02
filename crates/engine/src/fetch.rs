//! Log fetch port and its adapters.
//!
//! The log is a static asset regenerated between runs, so the HTTP adapter
//! appends a cache-busting token to every request to defeat intermediate
//! caches. There is no caching on our side either: reselecting a game
//! re-fetches.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;

/// Retrieves the raw newline-delimited JSON text for a game identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogFetcher: Send + Sync {
    async fn fetch(&self, game_id: &str) -> Result<String, FetchError>;
}

/// Fetches game logs served as static assets over HTTP.
#[derive(Clone)]
pub struct HttpLogFetcher {
    client: Client,
    base_url: String,
}

/// Default base URL for the static log assets.
pub const DEFAULT_LOG_BASE_URL: &str = "http://localhost:3000";

impl HttpLogFetcher {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a fetcher from the `GAME_LOG_BASE_URL` environment variable,
    /// falling back to the default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GAME_LOG_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LOG_BASE_URL.to_string());
        Self::new(&base_url)
    }
}

impl Default for HttpLogFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_BASE_URL)
    }
}

#[async_trait]
impl LogFetcher for HttpLogFetcher {
    async fn fetch(&self, game_id: &str) -> Result<String, FetchError> {
        // Token defeats intermediate caches; the log may have been
        // regenerated since the last request.
        let url = format!(
            "{}/{}?t={}",
            self.base_url,
            game_id,
            chrono::Utc::now().timestamp_millis()
        );
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Reads game logs from a local directory.
#[derive(Clone)]
pub struct FileLogFetcher {
    root: PathBuf,
}

impl FileLogFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LogFetcher for FileLogFetcher {
    async fn fetch(&self, game_id: &str) -> Result<String, FetchError> {
        Ok(tokio::fs::read_to_string(self.root.join(game_id)).await?)
    }
}
