//! `depscan` scan command implementation.

use depscan_core::{
    read_root_dependencies, scan_packages, DeprecationChain, GithubClient, MetadataProvider,
    Policy, RegistryClient, RepoStatusProvider, ScanError, ScanOptions, ScanWarning,
};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Stable schema version for `--json` output.
const SCAN_SCHEMA_VERSION: u32 = 1;

/// Scan command action.
#[derive(Debug, Clone)]
pub struct ScanAction {
    pub manifest: PathBuf,
    pub github_token: Option<String>,
    pub policy: Policy,
    pub workers: usize,
    pub registry: Option<String>,
}

/// Scan result for JSON output.
#[derive(Serialize)]
struct ScanJsonResult {
    ok: bool,
    schema_version: u32,
    deprecated: Vec<DeprecationChain>,
    warnings: Vec<ScanWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(action: ScanAction, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    runtime.block_on(run_scan(action, json))
}

async fn run_scan(action: ScanAction, json: bool) -> Result<()> {
    let roots = match read_root_dependencies(&action.manifest) {
        Ok(roots) => roots,
        Err(e) => fail(&e, json),
    };

    let registry = match action.registry.as_deref() {
        Some(url) => RegistryClient::new(url),
        None => RegistryClient::from_env(),
    };
    let registry = match registry {
        Ok(registry) => registry,
        Err(e) => fail(&e, json),
    };

    let github = match GithubClient::from_env(action.github_token.as_deref()) {
        Ok(github) => github,
        Err(e) => fail(&e, json),
    };

    tracing::debug!(
        roots = roots.packages.len(),
        registry = %registry.base_url(),
        workers = action.workers,
        "scanning root dependencies"
    );

    let options = ScanOptions {
        policy: action.policy,
        workers: action.workers,
    };
    let report = scan_packages(
        &roots.packages,
        Arc::new(registry) as Arc<dyn MetadataProvider>,
        Arc::new(github) as Arc<dyn RepoStatusProvider>,
        &options,
    )
    .await;

    let mut warnings = roots.warnings;
    warnings.extend(report.warnings.clone());
    for warning in &warnings {
        tracing::warn!(package = %warning.package, code = warning.code, "{}", warning.message);
    }

    if json {
        let result = ScanJsonResult {
            ok: true,
            schema_version: SCAN_SCHEMA_VERSION,
            deprecated: report.chains.clone(),
            warnings,
            error: None,
        };
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
    } else if report.has_deprecations() {
        for chain in &report.chains {
            println!("package {} is deprecated: {}", chain.package, chain.render());
        }
    } else {
        println!("no deprecated packages found");
    }

    if report.has_deprecations() {
        std::process::exit(1);
    }
    Ok(())
}

/// Report a configuration error and exit.
fn fail(error: &ScanError, json: bool) -> ! {
    if json {
        let result = ScanJsonResult {
            ok: false,
            schema_version: SCAN_SCHEMA_VERSION,
            deprecated: Vec::new(),
            warnings: Vec::new(),
            error: Some(error.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
    } else {
        eprintln!("error: {error}");
    }
    std::process::exit(2);
}
