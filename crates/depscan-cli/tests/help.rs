//! Integration tests for the CLI surface.

use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "depscan-cli", "--bin", "depscan", "--"]);
    cmd
}

#[test]
fn test_help_lists_scan_flags() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to run depscan --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--github-token",
        "--exclude-archived",
        "--exclude-repo",
        "--exclude-inaccessible",
        "--workers",
        "--registry",
        "--json",
    ] {
        assert!(stdout.contains(flag), "help should mention {flag}: {stdout}");
    }
}

#[test]
fn test_version() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to run depscan --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("depscan"));
}
