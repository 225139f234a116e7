//! Host package metadata and the default config it names

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::source::{parse_source, SourceFormat};
use crate::error::LoadError;

/// Extensions tried, in order, after `<name>.conf`; the bare name comes last.
const DEFAULT_CONFIG_EXTENSIONS: [&str; 4] = ["json", "toml", "yaml", "yml"];

/// `<working_dir><package_json_path>`; a leading separator is not an absolute path.
pub fn metadata_path(working_dir: &Path, package_json_path: &str) -> PathBuf {
    working_dir.join(package_json_path.trim_start_matches(|c: char| c == '/' || c == '\\'))
}

/// Declared package name.
///
/// JSON metadata (`package.json`) uses the top-level `name`; TOML metadata
/// uses `package.name` (`Cargo.toml`) or `project.name` (`pyproject.toml`).
pub fn package_name(content: &str, path: &Path) -> Result<String, LoadError> {
    let format = SourceFormat::from_path(path);
    let raw = parse_source(content, format).map_err(|reason| missing_metadata(path, reason))?;

    let name = match format {
        SourceFormat::Toml => ["package", "project"]
            .iter()
            .find_map(|table| raw.get(*table).and_then(|t| t.get("name")).and_then(Value::as_str)),
        _ => raw.get("name").and_then(Value::as_str),
    };

    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(missing_metadata(path, "no package name declared".to_string())),
    }
}

/// `<working_dir>/<name>.conf`, without any extension.
pub fn default_config_stem(working_dir: &Path, name: &str) -> PathBuf {
    working_dir.join(format!("{}.conf", name))
}

/// Every path tried for the default config, in lookup order.
pub fn default_config_candidates(working_dir: &Path, name: &str) -> Vec<PathBuf> {
    let stem = format!("{}.conf", name);
    DEFAULT_CONFIG_EXTENSIONS
        .iter()
        .map(|ext| working_dir.join(format!("{}.{}", stem, ext)))
        .chain(std::iter::once(working_dir.join(&stem)))
        .collect()
}

pub fn missing_metadata(path: &Path, reason: String) -> LoadError {
    LoadError::DefaultConfigMissing {
        expected: path.to_path_buf(),
        reason: format!("Can't find package metadata, no default config loaded ({})", reason),
        forced: false,
    }
}

pub fn missing_default(working_dir: &Path, name: &str) -> LoadError {
    LoadError::DefaultConfigMissing {
        expected: default_config_stem(working_dir, name),
        reason: format!(
            "You have no default config file! Expected {}.conf.({}) or {}.conf in the package root",
            name,
            DEFAULT_CONFIG_EXTENSIONS.join("|"),
            name
        ),
        forced: false,
    }
}
