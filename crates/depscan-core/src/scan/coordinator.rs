//! Two-phase scan orchestration.
//!
//! Phase 1 settles a direct verdict for every root package with a
//! bounded worker pool. Phase 2 runs the walker over the remaining roots
//! for transitive propagation. Separating the phases means transitive
//! reasoning always observes already-discovered direct deprecations as
//! final, which shrinks the race window a single fused pass would have.

use super::cache::{DeprecationCache, Verdict};
use super::classify::{Classifier, Policy};
use super::error::ScanWarning;
use super::provider::{MetadataProvider, RepoStatusProvider};
use super::report::{build_chain, DeprecationChain};
use super::walker::Walker;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// Default worker pool width per phase.
pub const DEFAULT_WORKERS: usize = 3;

/// Scan configuration.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Policy switches for the deprecation criteria.
    pub policy: Policy,
    /// Worker pool width, used by both phases.
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Outcome of a full scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// One chain per deprecated root, ordered by root name.
    pub chains: Vec<DeprecationChain>,
    /// Per-package conditions degraded to clean verdicts.
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Whether any root package is deprecated.
    #[must_use]
    pub fn has_deprecations(&self) -> bool {
        !self.chains.is_empty()
    }
}

/// Scan the root package set for direct and transitive deprecation.
///
/// Never fails: per-package provider errors degrade to clean verdicts
/// and surface in the report's warnings.
pub async fn scan_packages(
    roots: &HashSet<String>,
    metadata: Arc<dyn MetadataProvider>,
    status: Arc<dyn RepoStatusProvider>,
    options: &ScanOptions,
) -> ScanReport {
    let cache = DeprecationCache::new();
    let classifier = Classifier::new(metadata, status, options.policy);
    let workers = options.workers.max(1);

    // Phase 1: settle every root's direct classification before any
    // transitive reasoning begins.
    stream::iter(roots)
        .map(|name| {
            let cache = &cache;
            let classifier = &classifier;
            async move {
                cache
                    .direct_or_compute(name, || classifier.resolve(name))
                    .await;
            }
        })
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await;

    // Phase 2: transitive propagation for roots not already directly
    // deprecated.
    let mut remaining: Vec<&String> = Vec::new();
    for name in roots {
        if cache.verdict(name).await != Some(Verdict::Direct) {
            remaining.push(name);
        }
    }

    let walker = Walker::new(&cache, &classifier);
    stream::iter(remaining)
        .map(|name| {
            let walker = &walker;
            async move {
                walker.walk(name, &[]).await;
            }
        })
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await;

    // Report in sorted root order so output is stable even though the
    // traversal itself is not.
    let mut sorted_roots: Vec<&String> = roots.iter().collect();
    sorted_roots.sort();

    let mut chains = Vec::new();
    for name in sorted_roots {
        if let Some(chain) = build_chain(&cache, name).await {
            chains.push(chain);
        }
    }

    ScanReport {
        chains,
        warnings: cache.collect_warnings().await,
    }
}
