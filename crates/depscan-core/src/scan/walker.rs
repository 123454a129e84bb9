//! Cycle-safe transitive deprecation traversal.

use super::cache::{DeprecationCache, Verdict};
use super::classify::Classifier;
use futures::future::BoxFuture;

/// Walks the dependency graph of one package, consulting the shared
/// cache and recursing through the classifier, to produce a verdict that
/// accounts for transitive deprecation.
#[derive(Debug)]
pub struct Walker<'a> {
    cache: &'a DeprecationCache,
    classifier: &'a Classifier,
}

impl<'a> Walker<'a> {
    /// Create a walker over a scan's shared cache and classifier.
    #[must_use]
    pub fn new(cache: &'a DeprecationCache, classifier: &'a Classifier) -> Self {
        Self { cache, classifier }
    }

    /// Resolve the verdict for `name`.
    ///
    /// `ancestors` is the chain of packages whose resolution is currently
    /// open; it is extended by copy at each level, never mutated in
    /// place. When `name` appears in it, this edge closes a cycle and
    /// contributes a clean verdict without caching anything for the
    /// still-open ancestor.
    ///
    /// When several dependencies are independently deprecated, the first
    /// one discovered under the unordered dependency-set iteration wins;
    /// exactly one chain is reported per package.
    pub fn walk<'b>(&'b self, name: &'b str, ancestors: &'b [String]) -> BoxFuture<'b, Verdict> {
        Box::pin(async move {
            if let Some(verdict) = self.cache.verdict(name).await {
                return verdict;
            }

            if ancestors.iter().any(|ancestor| ancestor == name) {
                return Verdict::Clean;
            }

            let direct = self
                .cache
                .direct_or_compute(name, || self.classifier.resolve(name))
                .await;
            if direct.deprecated {
                return Verdict::Direct;
            }

            // Priority pass: a dependency whose direct deprecation is
            // already settled wins before any further recursion, so
            // completed work is never re-derived.
            for dep in &direct.dependencies {
                if self.cache.verdict(dep).await == Some(Verdict::Direct) {
                    let verdict = Verdict::Transitive { via: dep.clone() };
                    self.cache.record(name, verdict.clone()).await;
                    return verdict;
                }
            }

            let mut path = Vec::with_capacity(ancestors.len() + 1);
            path.extend_from_slice(ancestors);
            path.push(name.to_string());

            for dep in &direct.dependencies {
                if self.walk(dep, &path).await.is_deprecated() {
                    let verdict = Verdict::Transitive { via: dep.clone() };
                    self.cache.record(name, verdict.clone()).await;
                    return verdict;
                }
            }

            self.cache.record(name, Verdict::Clean).await;
            Verdict::Clean
        })
    }
}
