//! package.json root-dependency extraction.

use super::alias::resolve_alias;
use super::error::{codes, ScanError, ScanWarning};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Root dependencies extracted from a manifest.
#[derive(Debug, Clone, Default)]
pub struct RootDependencies {
    /// De-duplicated, alias-resolved package names.
    pub packages: HashSet<String>,
    /// Per-entry extraction warnings (malformed specifiers).
    pub warnings: Vec<ScanWarning>,
}

/// Read the root package set from a package.json file.
///
/// Only the `dependencies` section is scanned; an absent section yields
/// an empty set. Entries whose specifier is not a string are skipped
/// with a warning rather than failing the run.
///
/// # Errors
/// Returns an error if the file is missing, unreadable, or not a JSON
/// object.
pub fn read_root_dependencies(manifest_path: &Path) -> Result<RootDependencies, ScanError> {
    if !manifest_path.exists() {
        return Err(ScanError::ManifestNotFound(manifest_path.to_path_buf()));
    }

    let content = fs::read_to_string(manifest_path)
        .map_err(|e| ScanError::ManifestInvalid(format!("failed to read: {e}")))?;

    let doc: Value = serde_json::from_str(&content)
        .map_err(|e| ScanError::ManifestInvalid(format!("invalid JSON: {e}")))?;

    let root = doc
        .as_object()
        .ok_or_else(|| ScanError::ManifestInvalid("package.json must be a JSON object".to_string()))?;

    let mut result = RootDependencies::default();

    let Some(section) = root.get("dependencies") else {
        return Ok(result);
    };

    let Some(section) = section.as_object() else {
        return Err(ScanError::ManifestInvalid(format!(
            "'dependencies' must be an object, got {}",
            json_type_name(section)
        )));
    };

    for (name, specifier) in section {
        if let Some(specifier) = specifier.as_str() {
            result.packages.insert(resolve_alias(name, specifier));
        } else {
            result.warnings.push(ScanWarning::new(
                name.clone(),
                codes::SCAN_MANIFEST_INVALID,
                format!("expected string specifier, got {}", json_type_name(specifier)),
            ));
        }
    }

    Ok(result)
}

/// Get a human-readable type name for a JSON value.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
