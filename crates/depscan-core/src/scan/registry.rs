//! npm registry client.

use super::error::ScanError;
use super::provider::{MetadataProvider, PackageMetadata};
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default npm registry URL.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.com/";

/// Environment variable to override the registry URL.
pub const REGISTRY_ENV: &str = "DEPSCAN_NPM_REGISTRY";

/// Registry client for fetching package metadata.
///
/// The scanner works at package-name granularity, so only the `latest`
/// document is ever requested.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: Url,
    http: Client,
}

impl RegistryClient {
    /// Create a new registry client with the given base URL.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// created.
    pub fn new(base_url: &str) -> Result<Self, ScanError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScanError::Registry(format!("invalid registry URL '{base_url}': {e}")))?;

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("depscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanError::Registry(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    /// Create a client using the registry URL from environment or default.
    ///
    /// # Errors
    /// Returns an error if the client cannot be created.
    pub fn from_env() -> Result<Self, ScanError> {
        let url = std::env::var(REGISTRY_ENV).unwrap_or_else(|_| DEFAULT_REGISTRY.to_string());
        Self::new(&url)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the `latest` metadata document for a package.
    ///
    /// # Errors
    /// Returns an error if the request fails or the package is not found.
    pub async fn fetch_latest(&self, name: &str) -> Result<serde_json::Value, ScanError> {
        // URL-encode the name for scoped packages
        let encoded_name = if name.starts_with('@') {
            name.replace('/', "%2F")
        } else {
            name.to_string()
        };

        let url = self
            .base_url
            .join(&format!("{encoded_name}/latest"))
            .map_err(|e| ScanError::Registry(format!("failed to build URL for '{name}': {e}")))?;

        let response = self.http.get(url.as_str()).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ScanError::PackageNotFound(name.to_string()));
        }

        if !response.status().is_success() {
            return Err(ScanError::Registry(format!(
                "registry returned status {} for '{name}'",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await?;
        Ok(json)
    }
}

impl MetadataProvider for RegistryClient {
    fn fetch_metadata<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<PackageMetadata, ScanError>> {
        Box::pin(async move {
            let doc = self.fetch_latest(name).await?;
            Ok(PackageMetadata::from_document(&doc))
        })
    }
}
