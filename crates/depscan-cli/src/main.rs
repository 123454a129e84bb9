#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod logging;

use clap::Parser;
use depscan_core::{Policy, DEFAULT_WORKERS};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depscan")]
#[command(author, version, about = "Scan npm dependencies for deprecated packages", long_about = None)]
struct Cli {
    /// Path to the package.json to scan
    #[arg(value_name = "MANIFEST", default_value = "package.json")]
    manifest: PathBuf,

    /// GitHub token for repository status lookups
    #[arg(short = 'g', long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Do not treat packages with archived repositories as deprecated
    #[arg(long)]
    exclude_archived: bool,

    /// Do not treat packages without a repository field as deprecated
    #[arg(long)]
    exclude_repo: bool,

    /// Do not treat packages with missing repositories as deprecated
    #[arg(long)]
    exclude_inaccessible: bool,

    /// Concurrent package lookups per scan phase
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_name = "N")]
    workers: usize,

    /// Override the npm registry URL
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let policy = Policy {
        exclude_archived: cli.exclude_archived,
        exclude_repo: cli.exclude_repo,
        exclude_inaccessible: cli.exclude_inaccessible,
    };

    // Repository status lookups need a token unless both status-based
    // criteria are disabled.
    if cli.github_token.is_none() && !policy.skips_status_checks() {
        eprintln!("error: a GitHub token is required to check repository status");
        eprintln!(
            "hint: pass --github-token (or set GITHUB_TOKEN), or disable status checks with \
             --exclude-archived and --exclude-inaccessible"
        );
        std::process::exit(2);
    }

    logging::init(cli.verbose, cli.json);

    let action = commands::scan::ScanAction {
        manifest: cli.manifest,
        github_token: cli.github_token,
        policy,
        workers: cli.workers,
        registry: cli.registry,
    };
    commands::scan::run(action, cli.json)
}
