//! GitHub Releases API fetcher implementation

use tracing::{debug, warn};

use crate::version::error::FetchError;
use crate::version::fetcher::ReleaseFetcher;

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Repository publishing the Google Mobile Ads Unity plugin
pub const DEFAULT_REPOSITORY: &str = "googleads/googleads-mobile-unity";

/// Fetcher implementation for the GitHub "latest release" endpoint
pub struct GitHubReleaseFetcher {
    client: reqwest::Client,
    base_url: String,
    repository: String,
}

impl GitHubReleaseFetcher {
    /// Creates a new GitHubReleaseFetcher with a custom base URL
    pub fn new(base_url: &str, repository: &str, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
        })
    }

    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/releases/latest",
            self.base_url, self.repository
        )
    }
}

#[async_trait::async_trait]
impl ReleaseFetcher for GitHubReleaseFetcher {
    async fn fetch_latest_release(&self) -> Result<String, FetchError> {
        let url = self.latest_release_url();
        debug!("Fetching latest release: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(self.repository.clone()));
        }

        let rate_limit_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN && rate_limit_exhausted)
        {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(FetchError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(FetchError::UnexpectedStatus(status));
        }

        Ok(response.text().await?)
    }
}
