//! Scanner error types.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Scanner error codes.
pub mod codes {
    pub const SCAN_MANIFEST_NOT_FOUND: &str = "SCAN_MANIFEST_NOT_FOUND";
    pub const SCAN_MANIFEST_INVALID: &str = "SCAN_MANIFEST_INVALID";
    pub const SCAN_PACKAGE_NOT_FOUND: &str = "SCAN_PACKAGE_NOT_FOUND";
    pub const SCAN_REGISTRY_ERROR: &str = "SCAN_REGISTRY_ERROR";
    pub const SCAN_STATUS_ERROR: &str = "SCAN_STATUS_ERROR";
    pub const SCAN_ARGS_INVALID: &str = "SCAN_ARGS_INVALID";
}

/// Scanner error.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("invalid manifest: {0}")]
    ManifestInvalid(String),

    #[error("package not found: {0}")]
    PackageNotFound(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("repository status error: {0}")]
    Status(String),

    #[error("invalid arguments: {0}")]
    ArgsInvalid(String),
}

impl ScanError {
    /// Stable error code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ManifestNotFound(_) => codes::SCAN_MANIFEST_NOT_FOUND,
            Self::ManifestInvalid(_) => codes::SCAN_MANIFEST_INVALID,
            Self::PackageNotFound(_) => codes::SCAN_PACKAGE_NOT_FOUND,
            Self::Registry(_) => codes::SCAN_REGISTRY_ERROR,
            Self::Status(_) => codes::SCAN_STATUS_ERROR,
            Self::ArgsInvalid(_) => codes::SCAN_ARGS_INVALID,
        }
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Registry(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::Registry(format!("connection failed: {e}"))
        } else {
            Self::Registry(e.to_string())
        }
    }
}

/// Non-fatal, per-package condition recorded during a scan.
///
/// Provider failures degrade the affected package to a clean verdict
/// instead of aborting the scan; the condition is surfaced here.
#[derive(Debug, Clone, Serialize)]
pub struct ScanWarning {
    /// Package the condition applies to.
    pub package: String,
    /// Stable warning code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ScanWarning {
    /// Create a warning with an explicit code.
    #[must_use]
    pub fn new(package: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            code,
            message: message.into(),
        }
    }

    /// Create a warning from a degraded per-package error.
    #[must_use]
    pub fn from_error(package: &str, error: &ScanError) -> Self {
        Self::new(package, error.code(), error.to_string())
    }
}
