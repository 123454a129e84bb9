//! Shared in-memory providers for scan tests.

use depscan_core::{MetadataProvider, PackageMetadata, RepoStatus, RepoStatusProvider, ScanError};
use futures::future::BoxFuture;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory registry with per-package fetch counting.
#[derive(Default)]
pub struct MockRegistry {
    packages: HashMap<String, PackageMetadata>,
    unavailable: Vec<String>,
    fetches: Mutex<HashMap<String, usize>>,
    total_fetches: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package with a GitHub repository and the given dependencies.
    pub fn package(mut self, name: &str, deps: &[&str]) -> Self {
        self.packages
            .insert(name.to_string(), make_metadata(name, false, deps));
        self
    }

    /// Add a package carrying an explicit deprecation marker.
    pub fn deprecated_package(mut self, name: &str, deps: &[&str]) -> Self {
        self.packages
            .insert(name.to_string(), make_metadata(name, true, deps));
        self
    }

    /// Make metadata lookups for `name` fail.
    pub fn unavailable(mut self, name: &str) -> Self {
        self.unavailable.push(name.to_string());
        self
    }

    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.total_fetches.load(Ordering::SeqCst)
    }
}

fn make_metadata(name: &str, deprecated: bool, deps: &[&str]) -> PackageMetadata {
    let deps: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|d| ((*d).to_string(), json!("^1.0.0")))
        .collect();

    let mut doc = json!({
        "name": name,
        "repository": format!("https://github.com/org/{name}"),
        "dependencies": deps,
    });
    if deprecated {
        doc["deprecated"] = json!("no longer maintained");
    }

    PackageMetadata::from_document(&doc)
}

impl MetadataProvider for MockRegistry {
    fn fetch_metadata<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<PackageMetadata, ScanError>> {
        Box::pin(async move {
            *self
                .fetches
                .lock()
                .unwrap()
                .entry(name.to_string())
                .or_insert(0) += 1;
            self.total_fetches.fetch_add(1, Ordering::SeqCst);

            if self.unavailable.iter().any(|n| n == name) {
                return Err(ScanError::Registry(format!("registry down for {name}")));
            }

            self.packages
                .get(name)
                .cloned()
                .ok_or_else(|| ScanError::PackageNotFound(name.to_string()))
        })
    }
}

/// In-memory repository status source.
#[derive(Default)]
pub struct MockStatuses {
    statuses: HashMap<String, RepoStatus>,
}

impl MockStatuses {
    /// All repositories active unless overridden.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn archived(mut self, repo: &str) -> Self {
        self.statuses.insert(repo.to_string(), RepoStatus::Archived);
        self
    }

    pub fn inaccessible(mut self, repo: &str) -> Self {
        self.statuses
            .insert(repo.to_string(), RepoStatus::Inaccessible);
        self
    }
}

impl RepoStatusProvider for MockStatuses {
    fn fetch_status<'a>(
        &'a self,
        _org: &'a str,
        repo: &'a str,
    ) -> BoxFuture<'a, Result<RepoStatus, ScanError>> {
        Box::pin(async move {
            Ok(self
                .statuses
                .get(repo)
                .copied()
                .unwrap_or(RepoStatus::Active))
        })
    }
}

/// Collect a root set from names.
pub fn roots(names: &[&str]) -> std::collections::HashSet<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}
