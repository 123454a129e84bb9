//! Dependency deprecation scanning.
//!
//! Provides utilities for:
//! - Reading root dependencies from package.json
//! - Resolving `npm:` alias specifiers to real package names
//! - Normalizing repository URLs into GitHub org/repo references
//! - Classifying packages as directly deprecated from registry metadata
//!   and live repository status
//! - Caching verdicts across concurrent workers with single-flight fetches
//! - Walking the dependency graph for transitive deprecation, cycle-safe
//! - Reconstructing human-readable deprecation chains

pub mod alias;
pub mod cache;
pub mod classify;
pub mod coordinator;
pub mod error;
pub mod github;
pub mod manifest;
pub mod provider;
pub mod registry;
pub mod repo;
pub mod report;
pub mod walker;

pub use alias::{resolve_alias, resolve_dependency_set};
pub use cache::{DeprecationCache, DirectResolution, Verdict};
pub use classify::{Classifier, Policy};
pub use coordinator::{scan_packages, ScanOptions, ScanReport, DEFAULT_WORKERS};
pub use error::{codes, ScanError, ScanWarning};
pub use github::{GithubClient, DEFAULT_GITHUB_API, GITHUB_API_ENV};
pub use manifest::{read_root_dependencies, RootDependencies};
pub use provider::{MetadataProvider, PackageMetadata, RepoStatus, RepoStatusProvider};
pub use registry::{RegistryClient, DEFAULT_REGISTRY, REGISTRY_ENV};
pub use repo::{normalize_repository, RepoRef};
pub use report::{build_chain, DeprecationChain};
pub use walker::Walker;
