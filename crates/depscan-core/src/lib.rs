#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod scan;

pub use scan::cache::{DeprecationCache, DirectResolution, Verdict};
pub use scan::classify::{Classifier, Policy};
pub use scan::coordinator::{scan_packages, ScanOptions, ScanReport, DEFAULT_WORKERS};
pub use scan::error::{codes as scan_codes, ScanError, ScanWarning};
pub use scan::github::{GithubClient, DEFAULT_GITHUB_API, GITHUB_API_ENV};
pub use scan::manifest::{read_root_dependencies, RootDependencies};
pub use scan::provider::{MetadataProvider, PackageMetadata, RepoStatus, RepoStatusProvider};
pub use scan::registry::{RegistryClient, DEFAULT_REGISTRY, REGISTRY_ENV};
pub use scan::repo::{normalize_repository, RepoRef};
pub use scan::report::{build_chain, DeprecationChain};
pub use scan::walker::Walker;
