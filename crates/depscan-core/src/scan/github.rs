//! GitHub repository status client.

use super::error::ScanError;
use super::provider::{RepoStatus, RepoStatusProvider};
use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default GitHub API base URL.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com/";

/// Environment variable to override the API base URL.
pub const GITHUB_API_ENV: &str = "DEPSCAN_GITHUB_API";

/// Client for the repository status endpoint.
///
/// A read-only token with no scopes is enough; unauthenticated requests
/// work too but hit much lower rate limits.
#[derive(Debug, Clone)]
pub struct GithubClient {
    base_url: Url,
    http: Client,
}

impl GithubClient {
    /// Create a new client with the given API base URL and optional token.
    ///
    /// # Errors
    /// Returns an error if the URL or token is invalid or the HTTP client
    /// cannot be created.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ScanError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScanError::Status(format!("invalid API URL '{base_url}': {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ScanError::ArgsInvalid(format!("invalid GitHub token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("depscan/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ScanError::Status(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    /// Create a client using the API URL from environment or default.
    ///
    /// # Errors
    /// Returns an error if the client cannot be created.
    pub fn from_env(token: Option<&str>) -> Result<Self, ScanError> {
        let url = std::env::var(GITHUB_API_ENV).unwrap_or_else(|_| DEFAULT_GITHUB_API.to_string());
        Self::new(&url, token)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the live status of `org`/`repo`.
    ///
    /// A not-found response maps to [`RepoStatus::Inaccessible`]; any
    /// other non-success status is an error the caller degrades from.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is not
    /// interpretable.
    pub async fn fetch_repo_status(&self, org: &str, repo: &str) -> Result<RepoStatus, ScanError> {
        let url = self
            .base_url
            .join(&format!("repos/{org}/{repo}"))
            .map_err(|e| ScanError::Status(format!("failed to build URL for '{org}/{repo}': {e}")))?;

        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ScanError::Status(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(RepoStatus::Inaccessible);
        }

        if !response.status().is_success() {
            return Err(ScanError::Status(format!(
                "status lookup returned {} for '{org}/{repo}'",
                response.status()
            )));
        }

        let doc: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScanError::Status(e.to_string()))?;

        let archived = doc
            .get("archived")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        Ok(if archived {
            RepoStatus::Archived
        } else {
            RepoStatus::Active
        })
    }
}

impl RepoStatusProvider for GithubClient {
    fn fetch_status<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
    ) -> BoxFuture<'a, Result<RepoStatus, ScanError>> {
        Box::pin(self.fetch_repo_status(org, repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(GithubClient::new(DEFAULT_GITHUB_API, None).is_ok());
        assert!(GithubClient::new(DEFAULT_GITHUB_API, Some("ghp_token")).is_ok());
    }

    #[test]
    fn test_client_invalid_url() {
        assert!(GithubClient::new("not-a-url", None).is_err());
    }

    #[test]
    fn test_client_invalid_token() {
        let client = GithubClient::new(DEFAULT_GITHUB_API, Some("bad\ntoken"));
        assert!(client.is_err());
    }

    #[test]
    fn test_repo_url_layout() {
        let client = GithubClient::new(DEFAULT_GITHUB_API, None).unwrap();
        let url = client.base_url().join("repos/org/repo").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/org/repo");
    }
}
