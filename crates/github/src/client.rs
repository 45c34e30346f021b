//! GitHub contents API client.
//!
//! Retrieves a repository's top-level listing page by page and fetches raw
//! file bodies from the download URLs the listing hands out.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use code_review_core::{
    traits::{ContentSource, RepositoryHost},
    types::{FileEntry, RepositoryReference},
    Error, Result,
};

/// Media type requested from the contents endpoint.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Configuration for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// API base URL.
    pub api_url: String,
    /// Bearer token. Requests are unauthenticated without one.
    pub token: Option<Secret<String>>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Upper bound on listing pages before giving up.
    pub max_pages: u32,
    /// User-Agent header (required by GitHub).
    pub user_agent: String,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            max_pages: 100,
            user_agent: concat!("code-review/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitHubClientConfig {
    /// Set the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Secret::new(token.into()));
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the page cap.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

/// HTTP client for the GitHub contents API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<Secret<String>>,
    max_pages: u32,
}

impl GitHubClient {
    /// Build a client from configuration.
    pub fn new(config: GitHubClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
            max_pages: config.max_pages,
        })
    }

    fn contents_url(&self, reference: &RepositoryReference) -> String {
        format!(
            "{}/repos/{}/{}/contents",
            self.api_url, reference.owner, reference.name
        )
    }

    /// Fetch and decode a single listing page.
    async fn fetch_page(&self, url: &str, page: u32) -> Result<Vec<FileEntry>> {
        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .query(&[("page", page)]);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| transport_error(url, e))?;
        let status = response.status();

        tracing::debug!(page, status = status.as_u16(), "Listing page response");

        if status != StatusCode::OK {
            tracing::error!(page, status = status.as_u16(), "Failed to fetch repository contents");
            return Err(Error::from_listing_status(status.as_u16()));
        }

        response.json::<Vec<FileEntry>>().await.map_err(|e| {
            Error::upstream(format!("Malformed listing page {} from {}: {}", page, url, e))
        })
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::upstream(format!("Request to {} timed out", url))
    } else {
        Error::upstream(format!("Request to {} failed: {}", url, e))
    }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn fetch_listing(&self, reference: &RepositoryReference) -> Result<Vec<FileEntry>> {
        tracing::info!(repository = %reference, "Fetching repository contents");

        let url = self.contents_url(reference);
        let mut all_entries = Vec::new();
        let mut last_page: Option<Vec<FileEntry>> = None;
        let mut page = 1;

        loop {
            if page > self.max_pages {
                return Err(Error::upstream(format!(
                    "Pagination of {} did not terminate within {} pages",
                    reference, self.max_pages
                )));
            }

            let entries = self.fetch_page(&url, page).await?;
            metrics::counter!("github_pages_fetched_total").increment(1);
            tracing::debug!(page, items = entries.len(), "Fetched listing page");

            // No explicit last-page signal: a repeated page means the backend
            // is serving the same content past the real end.
            if last_page.as_ref() == Some(&entries) {
                tracing::info!(page, "Page repeats previous content, stopping pagination");
                break;
            }

            if entries.is_empty() {
                tracing::info!(page, "Empty page, stopping pagination");
                break;
            }

            all_entries.extend(entries.iter().cloned());
            last_page = Some(entries);
            page += 1;
        }

        tracing::info!(repository = %reference, total = all_entries.len(), "Listing complete");
        Ok(all_entries)
    }
}

#[async_trait]
impl ContentSource for GitHubClient {
    async fn fetch_raw(&self, locator: &str) -> Result<String> {
        let response = self
            .http
            .get(locator)
            .send()
            .await
            .map_err(|e| transport_error(locator, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: format!("Failed to fetch file content from {}", locator),
            });
        }

        response
            .text()
            .await
            .map_err(|e| Error::upstream(format!("Failed to read body of {}: {}", locator, e)))
    }
}
