//! Repository URL normalization.
//!
//! Registry metadata encodes repository locations in many shapes:
//! a bare string, an object with a `url` field, `git+`/`ssh://`/`git://`
//! prefixes, `git@github.com:` SSH shorthand, `.git` suffixes, URL
//! fragments. This module canonicalizes all of them into one comparable
//! form and extracts the GitHub org/repo pair.
//!
//! Anything that cannot be confidently interpreted resolves to `None`.
//! That is the conservative default: the scanner never alerts on a
//! repository it cannot identify.

use serde_json::Value;

/// A GitHub repository identity extracted from a normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Organization or user name.
    pub org: String,
    /// Repository name.
    pub repo: String,
}

/// Normalize a raw `repository` metadata field into a [`RepoRef`].
///
/// `None` input means the field was absent; a present field may be a
/// string URL or an object with a `url` field. Any other shape (including
/// `null`) is unresolvable. Non-GitHub URLs are unresolvable.
#[must_use]
pub fn normalize_repository(repository: Option<&Value>) -> Option<RepoRef> {
    let raw = match repository? {
        Value::String(url) => url.as_str(),
        Value::Object(map) => map.get("url")?.as_str()?,
        _ => return None,
    };

    parse_repo_ref(&canonicalize_url(raw)?)
}

/// Canonicalize a repository URL into lowercase `https://github.com/...`
/// form.
fn canonicalize_url(raw: &str) -> Option<String> {
    let mut url = raw.to_lowercase();

    if !url.contains("github.com") {
        return None;
    }

    if let Some(rest) = url.strip_prefix("git+") {
        url = rest.to_string();
    }
    if let Some(rest) = url.strip_prefix("ssh://") {
        url = rest.to_string();
    }
    if let Some(rest) = url.strip_prefix("git://") {
        url = format!("https://{rest}");
    }
    if let Some(rest) = url.strip_prefix("git@github.com:") {
        url = format!("https://github.com/{rest}");
    } else if let Some(rest) = url.strip_prefix("git@github.com") {
        url = format!("https://github.com{rest}");
    }

    // Strip URL fragments.
    if let Some(pos) = url.find('#') {
        url.truncate(pos);
    }

    if url.ends_with(".git") {
        url.truncate(url.len() - ".git".len());
    }

    while url.ends_with('/') {
        url.pop();
    }

    Some(url)
}

/// Extract org/repo from a canonicalized URL.
///
/// Splitting `https://github.com/<org>/<repo>` on `/` puts the org at
/// segment 3 and the repo at segment 4; fewer segments means the URL is
/// not in a shape we can scan.
fn parse_repo_ref(url: &str) -> Option<RepoRef> {
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 5 {
        return None;
    }

    Some(RepoRef {
        org: parts[3].to_string(),
        repo: parts[4].to_string(),
    })
}
