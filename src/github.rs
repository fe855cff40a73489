use crate::error::{ExplorerError, Result};
use crate::types::{Repository, SearchResponse};
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const SEARCH_PATH: &str = "search/repositories";

/// Anything that can answer a repository search.
///
/// The controller only depends on this seam, so tests can script responses
/// without a network.
pub trait SearchBackend: Send + Sync {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Repository>>> + Send;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            user_agent: format!("github-repo-explorer/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        // A trailing slash keeps Url::join from dropping the last path segment
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| ExplorerError::Config(format!("Invalid API base URL {}: {}", config.base_url, e)))?;

        Ok(GitHubClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the search URL with the query percent-encoded.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ExplorerError::InvalidQuery("query must not be empty".to_string()));
        }

        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| ExplorerError::Config(format!("Invalid search URL: {}", e)))?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        // Single attempt: the caller decides whether to search again
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        warn!(%url, status = status.as_u16(), "Search request rejected");
        Err(ExplorerError::Remote {
            status: status.as_u16(),
            status_text,
        })
    }

    /// Search repositories. One request per call, results in server order.
    pub async fn search_repositories(&self, query: &str) -> Result<Vec<Repository>> {
        let url = self.search_url(query)?;
        debug!(%url, "Searching repositories");

        let response = self.make_request(url).await?;
        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let items = parsed.into_items();

        debug!(query, results = items.len(), "Search completed");
        Ok(items)
    }
}

impl SearchBackend for GitHubClient {
    async fn search(&self, query: &str) -> Result<Vec<Repository>> {
        self.search_repositories(query).await
    }
}
