//! Path normalization

use std::path::Path;

/// Forward-slash form of `path`, used as the key of a loaded config source.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// `path` relative to `base` when it lives under it, otherwise as given.
pub fn display_relative(path: &Path, base: &Path) -> String {
    let shown = path.strip_prefix(base).unwrap_or(path);
    normalize_path(&shown.to_string_lossy())
}
