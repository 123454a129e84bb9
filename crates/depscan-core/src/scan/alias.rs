//! npm alias specifier resolution.
//!
//! A dependency may be declared under a local alias pointing at a
//! different real package:
//!
//! - `{"foo": "npm:bar@^1.0.0"}` means `foo` is really `bar`
//! - `{"foo": "npm:@scope/bar"}` means `foo` is really `@scope/bar`
//!
//! All graph traversal happens on the resolved name; version ranges are
//! discarded entirely.

use std::collections::HashSet;

/// Prefix marking an aliased version specifier.
const ALIAS_PREFIX: &str = "npm:";

/// Resolve a declared dependency entry to the real package name.
///
/// If the specifier carries the `npm:` alias prefix, the real name is the
/// substring up to the range delimiter; the search for the delimiting `@`
/// starts past the first character of the real name so the leading `@` of
/// a scoped package is not mistaken for it. Otherwise the declared name is
/// returned unchanged.
#[must_use]
pub fn resolve_alias(declared: &str, specifier: &str) -> String {
    let specifier = specifier.trim();

    let Some(real) = specifier.strip_prefix(ALIAS_PREFIX) else {
        return declared.to_string();
    };

    let delimiter = real
        .char_indices()
        .skip(1)
        .find_map(|(i, c)| (c == '@').then_some(i));

    match delimiter {
        // "npm:bar@^1.0.0" -> "bar"
        Some(at) => real[..at].to_string(),
        // "npm:bar" -> "bar"
        None => real.to_string(),
    }
}

/// Resolve a raw dependency listing into a de-duplicated set of package
/// names.
///
/// The returned set is unordered; when several dependencies are
/// independently deprecated, which one a scan reports first depends on
/// this iteration order and is unspecified.
#[must_use]
pub fn resolve_dependency_set(dependencies: &[(String, String)]) -> HashSet<String> {
    dependencies
        .iter()
        .map(|(name, specifier)| resolve_alias(name, specifier))
        .collect()
}
