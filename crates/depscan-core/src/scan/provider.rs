//! Provider seams for the two external data sources.
//!
//! The engine consumes registry metadata and repository status through
//! these traits; transport, retries and authentication belong to the
//! implementations ([`super::registry::RegistryClient`] and
//! [`super::github::GithubClient`]).

use super::error::ScanError;
use futures::future::BoxFuture;
use serde_json::Value;

/// Registry metadata for one package, reduced to the fields the scanner
/// consumes.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    /// True when the document carries a `deprecated` marker. Presence
    /// alone signals deprecation; the marker's value is irrelevant.
    pub deprecated: bool,
    /// Raw `repository` field, if present. The raw JSON value is kept so
    /// that a present-but-malformed field stays distinguishable from an
    /// absent one.
    pub repository: Option<Value>,
    /// Declared dependencies as (name, version specifier) pairs.
    pub dependencies: Vec<(String, String)>,
}

impl PackageMetadata {
    /// Extract scanner-relevant fields from a registry metadata document.
    ///
    /// Dependency entries whose specifier is not a string keep the
    /// declared name with an empty specifier; the alias resolver passes
    /// those through unchanged.
    #[must_use]
    pub fn from_document(doc: &Value) -> Self {
        let dependencies = doc
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|obj| {
                obj.iter()
                    .map(|(name, specifier)| {
                        let specifier = specifier.as_str().unwrap_or_default();
                        (name.clone(), specifier.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            deprecated: doc.get("deprecated").is_some(),
            repository: doc.get("repository").cloned(),
            dependencies,
        }
    }
}

/// Live status of a source repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    /// Repository exists and is not archived.
    Active,
    /// Repository is marked read-only/inactive by its host.
    Archived,
    /// Status lookup returned not-found: possibly private or deleted.
    Inaccessible,
}

/// Registry metadata source, keyed by package name.
pub trait MetadataProvider: Send + Sync {
    /// Fetch the metadata document for `name`.
    fn fetch_metadata<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<PackageMetadata, ScanError>>;
}

/// Repository status source, keyed by org/repo.
pub trait RepoStatusProvider: Send + Sync {
    /// Fetch the live status for `org`/`repo`.
    fn fetch_status<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
    ) -> BoxFuture<'a, Result<RepoStatus, ScanError>>;
}
