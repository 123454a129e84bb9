//! Direct-deprecation classification.
//!
//! Decides whether a single package is deprecated by its own metadata or
//! repository status, independent of its dependencies. Policy flags can
//! disable individual criteria, but an explicit `deprecated` marker in
//! the metadata always wins.

use super::alias::resolve_dependency_set;
use super::cache::DirectResolution;
use super::error::ScanWarning;
use super::provider::{MetadataProvider, PackageMetadata, RepoStatus, RepoStatusProvider};
use super::repo::normalize_repository;
use std::sync::Arc;

/// Policy switches disabling individual deprecation criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Do not alert on packages whose repository is archived.
    pub exclude_archived: bool,
    /// Do not alert on packages that declare no repository at all.
    pub exclude_repo: bool,
    /// Do not alert on packages whose repository is inaccessible.
    pub exclude_inaccessible: bool,
}

impl Policy {
    /// Whether the policy skips repository-status lookups entirely.
    #[must_use]
    pub fn skips_status_checks(&self) -> bool {
        self.exclude_archived && self.exclude_inaccessible
    }
}

/// Classifies packages as directly deprecated.
///
/// Owns the provider handles; caching belongs to the walker and
/// coordinator, never to the classifier itself.
pub struct Classifier {
    metadata: Arc<dyn MetadataProvider>,
    status: Arc<dyn RepoStatusProvider>,
    policy: Policy,
}

impl Classifier {
    /// Create a classifier over the given providers and policy.
    #[must_use]
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        status: Arc<dyn RepoStatusProvider>,
        policy: Policy,
    ) -> Self {
        Self {
            metadata,
            status,
            policy,
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Decide direct deprecation for already-fetched metadata.
    ///
    /// Performs at most one repository-status call. First match wins:
    /// 1. explicit `deprecated` marker, regardless of policy;
    /// 2. no `repository` field at all, unless excluded;
    /// 3. repository archived or inaccessible, per policy.
    ///
    /// A failed status lookup (other than not-found) degrades to "not
    /// deprecated" and is reported through the returned warning.
    pub async fn classify(
        &self,
        name: &str,
        meta: &PackageMetadata,
    ) -> (bool, Option<ScanWarning>) {
        if meta.deprecated {
            return (true, None);
        }

        if !self.policy.exclude_repo && meta.repository.is_none() {
            return (true, None);
        }

        if self.policy.skips_status_checks() {
            return (false, None);
        }

        // Not resolvable to a GitHub identity: nothing further to verify.
        let Some(repo_ref) = normalize_repository(meta.repository.as_ref()) else {
            return (false, None);
        };

        match self.status.fetch_status(&repo_ref.org, &repo_ref.repo).await {
            Ok(RepoStatus::Inaccessible) => (!self.policy.exclude_inaccessible, None),
            Ok(RepoStatus::Archived) => (!self.policy.exclude_archived, None),
            Ok(RepoStatus::Active) => (false, None),
            Err(e) => (false, Some(ScanWarning::from_error(name, &e))),
        }
    }

    /// Fetch metadata for `name` and classify it.
    ///
    /// This is the expensive compute behind the cache's single-flight
    /// slot. Provider failures never propagate: the package resolves
    /// clean with the condition recorded as a warning.
    pub async fn resolve(&self, name: &str) -> DirectResolution {
        let meta = match self.metadata.fetch_metadata(name).await {
            Ok(meta) => meta,
            Err(e) => {
                // Absence of evidence is not deprecation.
                return DirectResolution {
                    deprecated: false,
                    dependencies: std::collections::HashSet::new(),
                    warnings: vec![ScanWarning::from_error(name, &e)],
                };
            }
        };

        let (deprecated, warning) = self.classify(name, &meta).await;

        DirectResolution {
            deprecated,
            dependencies: resolve_dependency_set(&meta.dependencies),
            warnings: warning.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::error::{codes, ScanError};
    use futures::future::BoxFuture;
    use serde_json::json;
    use std::collections::HashMap;

    struct FixedStatus(HashMap<(String, String), RepoStatus>);

    impl RepoStatusProvider for FixedStatus {
        fn fetch_status<'a>(
            &'a self,
            org: &'a str,
            repo: &'a str,
        ) -> BoxFuture<'a, Result<RepoStatus, ScanError>> {
            let key = (org.to_string(), repo.to_string());
            Box::pin(async move {
                self.0
                    .get(&key)
                    .copied()
                    .ok_or_else(|| ScanError::Status(format!("no fixture for {org}/{repo}")))
            })
        }
    }

    struct NoMetadata;

    impl MetadataProvider for NoMetadata {
        fn fetch_metadata<'a>(
            &'a self,
            name: &'a str,
        ) -> BoxFuture<'a, Result<PackageMetadata, ScanError>> {
            Box::pin(async move { Err(ScanError::PackageNotFound(name.to_string())) })
        }
    }

    fn classifier(statuses: &[(&str, &str, RepoStatus)], policy: Policy) -> Classifier {
        let map = statuses
            .iter()
            .map(|(org, repo, status)| (((*org).to_string(), (*repo).to_string()), *status))
            .collect();
        Classifier::new(Arc::new(NoMetadata), Arc::new(FixedStatus(map)), policy)
    }

    fn meta_with_repo(url: &str) -> PackageMetadata {
        PackageMetadata {
            deprecated: false,
            repository: Some(json!(url)),
            dependencies: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_deprecated_marker_wins_over_policy() {
        let policy = Policy {
            exclude_archived: true,
            exclude_repo: true,
            exclude_inaccessible: true,
        };
        let c = classifier(&[], policy);
        let meta = PackageMetadata {
            deprecated: true,
            repository: Some(json!("https://github.com/org/repo")),
            dependencies: Vec::new(),
        };

        let (deprecated, warning) = c.classify("pkg", &meta).await;
        assert!(deprecated);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_missing_repository_field() {
        let c = classifier(&[], Policy::default());
        let (deprecated, _) = c.classify("pkg", &PackageMetadata::default()).await;
        assert!(deprecated);

        let policy = Policy {
            exclude_repo: true,
            exclude_archived: true,
            exclude_inaccessible: true,
        };
        let c = classifier(&[], policy);
        let (deprecated, _) = c.classify("pkg", &PackageMetadata::default()).await;
        assert!(!deprecated);
    }

    #[tokio::test]
    async fn test_status_checks_skipped_when_both_excluded() {
        // No status fixtures at all: a lookup would produce a warning.
        let policy = Policy {
            exclude_archived: true,
            exclude_inaccessible: true,
            ..Policy::default()
        };
        let c = classifier(&[], policy);
        let (deprecated, warning) = c
            .classify("pkg", &meta_with_repo("https://github.com/org/repo"))
            .await;
        assert!(!deprecated);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_archived_repository() {
        let c = classifier(&[("org", "repo", RepoStatus::Archived)], Policy::default());
        let (deprecated, _) = c
            .classify("pkg", &meta_with_repo("https://github.com/org/repo"))
            .await;
        assert!(deprecated);

        let policy = Policy {
            exclude_archived: true,
            ..Policy::default()
        };
        let c = classifier(&[("org", "repo", RepoStatus::Archived)], policy);
        let (deprecated, _) = c
            .classify("pkg", &meta_with_repo("https://github.com/org/repo"))
            .await;
        assert!(!deprecated);
    }

    #[tokio::test]
    async fn test_inaccessible_repository() {
        let c = classifier(
            &[("org", "repo", RepoStatus::Inaccessible)],
            Policy::default(),
        );
        let (deprecated, _) = c
            .classify("pkg", &meta_with_repo("https://github.com/org/repo"))
            .await;
        assert!(deprecated);

        let policy = Policy {
            exclude_inaccessible: true,
            ..Policy::default()
        };
        let c = classifier(&[("org", "repo", RepoStatus::Inaccessible)], policy);
        let (deprecated, _) = c
            .classify("pkg", &meta_with_repo("https://github.com/org/repo"))
            .await;
        assert!(!deprecated);
    }

    #[tokio::test]
    async fn test_unresolvable_repository_is_clean() {
        let c = classifier(&[], Policy::default());
        let (deprecated, warning) = c
            .classify("pkg", &meta_with_repo("https://gitlab.com/org/repo"))
            .await;
        assert!(!deprecated);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_malformed_repository_skips_no_repo_criterion() {
        // A present-but-malformed repository field is not "no repository
        // field": it resolves unresolvable and classifies clean.
        let c = classifier(&[], Policy::default());
        let meta = PackageMetadata {
            deprecated: false,
            repository: Some(json!(42)),
            dependencies: Vec::new(),
        };
        let (deprecated, _) = c.classify("pkg", &meta).await;
        assert!(!deprecated);
    }

    #[tokio::test]
    async fn test_status_failure_degrades_with_warning() {
        let c = classifier(&[], Policy::default());
        let (deprecated, warning) = c
            .classify("pkg", &meta_with_repo("https://github.com/org/repo"))
            .await;
        assert!(!deprecated);
        let warning = warning.expect("degraded lookup should warn");
        assert_eq!(warning.code, codes::SCAN_STATUS_ERROR);
    }

    #[tokio::test]
    async fn test_resolve_degrades_metadata_failure() {
        let c = classifier(&[], Policy::default());
        let resolution = c.resolve("ghost").await;
        assert!(!resolution.deprecated);
        assert!(resolution.dependencies.is_empty());
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].code, codes::SCAN_PACKAGE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_classify_is_idempotent() {
        let c = classifier(&[("org", "repo", RepoStatus::Archived)], Policy::default());
        let meta = meta_with_repo("https://github.com/org/repo");
        let first = c.classify("pkg", &meta).await.0;
        let second = c.classify("pkg", &meta).await.0;
        assert_eq!(first, second);
    }
}
