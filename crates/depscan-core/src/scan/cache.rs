//! Shared verdict cache with single-flight direct resolution.
//!
//! The cache is the only state shared across scan workers. All reads and
//! writes for a given key are linearizable: the direct fetch+classify for
//! a package runs at most once per scan, and concurrent callers for the
//! same unresolved name wait for the winner's result instead of issuing
//! duplicate network calls.

use super::error::ScanWarning;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Final deprecation verdict for one package.
///
/// Absence from the cache is the "unknown" state; entries only ever move
/// from absent to one of these terminal verdicts, never back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Not deprecated, directly or transitively, under the active policy.
    Clean,
    /// The package itself satisfies a deprecation criterion.
    Direct,
    /// Some dependency is deprecated; `via` names the immediate dependency
    /// through which deprecation was discovered, one hop at a time, so a
    /// chain can be rebuilt by repeated lookup.
    Transitive { via: String },
}

impl Verdict {
    /// Whether this verdict marks the package deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        !matches!(self, Self::Clean)
    }
}

/// Outcome of the single-flight fetch+classify step for one package.
#[derive(Debug, Clone, Default)]
pub struct DirectResolution {
    /// Whether the package is directly deprecated.
    pub deprecated: bool,
    /// Alias-resolved, de-duplicated dependency names. Iteration order is
    /// unspecified.
    pub dependencies: HashSet<String>,
    /// Conditions degraded to a clean outcome while resolving.
    pub warnings: Vec<ScanWarning>,
}

type DirectSlot = Arc<OnceCell<Arc<DirectResolution>>>;

/// Synchronized package-name keyed store shared by all scan workers.
#[derive(Debug, Default)]
pub struct DeprecationCache {
    /// Single-flight slots for the direct fetch+classify per package.
    direct: Mutex<HashMap<String, DirectSlot>>,
    /// Terminal verdicts. Monotonic: the first write for a key wins.
    verdicts: Mutex<HashMap<String, Verdict>>,
}

impl DeprecationCache {
    /// Create an empty cache for one scan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the direct fetch+classify for `name` at most once.
    ///
    /// The first caller executes `compute`; concurrent callers for the
    /// same name wait on its slot and share the result. The wait is
    /// bounded by one network round trip. A deprecated outcome records
    /// the `Direct` verdict immediately.
    pub async fn direct_or_compute<F, Fut>(&self, name: &str, compute: F) -> Arc<DirectResolution>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DirectResolution>,
    {
        let slot = {
            let mut direct = self.direct.lock().await;
            Arc::clone(direct.entry(name.to_string()).or_default())
        };

        let resolution = slot
            .get_or_init(|| async { Arc::new(compute().await) })
            .await;
        let resolution = Arc::clone(resolution);

        if resolution.deprecated {
            self.record(name, Verdict::Direct).await;
        }

        resolution
    }

    /// Completed direct resolution for `name`, if any.
    pub async fn direct(&self, name: &str) -> Option<Arc<DirectResolution>> {
        let direct = self.direct.lock().await;
        direct.get(name).and_then(|slot| slot.get().cloned())
    }

    /// Terminal verdict for `name`, if already settled.
    pub async fn verdict(&self, name: &str) -> Option<Verdict> {
        self.verdicts.lock().await.get(name).cloned()
    }

    /// Record a terminal verdict. The first write for a key wins;
    /// later writes are ignored so settled verdicts never revert.
    pub async fn record(&self, name: &str, verdict: Verdict) {
        self.verdicts
            .lock()
            .await
            .entry(name.to_string())
            .or_insert(verdict);
    }

    /// Collect the warnings from every completed direct resolution.
    pub async fn collect_warnings(&self) -> Vec<ScanWarning> {
        let direct = self.direct.lock().await;
        let mut warnings = Vec::new();
        for slot in direct.values() {
            if let Some(resolution) = slot.get() {
                warnings.extend(resolution.warnings.iter().cloned());
            }
        }
        warnings
    }
}
