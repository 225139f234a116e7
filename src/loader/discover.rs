//! Resolving an explicit `--config` path or glob to files
//!
//! The pattern is tried as given and relative to the working directory. Plain
//! paths must name an existing file; glob patterns are expanded by walking the
//! pattern's literal directory prefix and matching the remainder with globset.

use globset::GlobBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::LoadError;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Every file matched by `pattern`, deduplicated and sorted.
///
/// Zero matches, or an invalid glob, is [`LoadError::SourceNotFound`].
pub fn resolve_custom_sources(pattern: &str, working_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let not_found = |reason: Option<String>| LoadError::SourceNotFound {
        pattern: pattern.to_string(),
        cwd: working_dir.to_path_buf(),
        reason,
    };

    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    for candidate in candidates(pattern, working_dir) {
        let found = if is_glob(&candidate) {
            expand_glob(&candidate).map_err(|reason| not_found(Some(reason)))?
        } else if candidate.is_file() {
            vec![candidate]
        } else {
            Vec::new()
        };

        for path in found {
            let key = path.canonicalize().unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                matches.push(path);
            }
        }
    }

    if matches.is_empty() {
        return Err(not_found(None));
    }
    matches.sort();
    Ok(matches)
}

/// The pattern as given, then joined onto the working directory.
pub fn candidates(pattern: &str, working_dir: &Path) -> Vec<PathBuf> {
    let as_given = PathBuf::from(pattern);
    let relative = working_dir.join(pattern.trim_start_matches(|c: char| c == '/' || c == '\\'));
    if as_given == relative {
        vec![as_given]
    } else {
        vec![as_given, relative]
    }
}

pub fn is_glob(path: &Path) -> bool {
    path.to_string_lossy().contains(&GLOB_META[..])
}

fn expand_glob(pattern: &Path) -> Result<Vec<PathBuf>, String> {
    let mut base = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in pattern.components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !text.contains(&GLOB_META[..]) {
            base.push(component);
        } else {
            rest.push(text.into_owned());
        }
    }
    if base.as_os_str().is_empty() {
        base = PathBuf::from(".");
    }

    let matcher = GlobBuilder::new(&rest.join("/"))
        .literal_separator(true)
        .build()
        .map_err(|e| e.to_string())?
        .compile_matcher();

    let max_depth = if rest.iter().any(|segment| segment.contains("**")) {
        usize::MAX
    } else {
        rest.len()
    };

    let mut found = Vec::new();
    for entry in WalkDir::new(&base)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&base) else {
            continue;
        };
        if matcher.is_match(relative) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, "{}").expect("write");
    }

    #[test]
    fn literal_path_relative_to_working_dir() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "custom.json");

        let found = resolve_custom_sources("/custom.json", tmp.path()).expect("found");
        assert_eq!(found, vec![tmp.path().join("custom.json")]);
    }

    #[test]
    fn absolute_path_as_given() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "custom.json");
        let absolute = tmp.path().join("custom.json");
        let other = TempDir::new().expect("other");

        let found =
            resolve_custom_sources(absolute.to_str().expect("utf8"), other.path()).expect("found");
        assert_eq!(found, vec![absolute]);
    }

    #[test]
    fn the_same_file_is_reported_once() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "custom.json");
        let absolute = tmp.path().join("custom.json");

        let found = resolve_custom_sources(absolute.to_str().expect("utf8"), Path::new("/"))
            .expect("found");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn glob_matches_are_sorted_and_stay_in_one_directory() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "conf/b.json");
        touch(tmp.path(), "conf/a.json");
        touch(tmp.path(), "conf/notes.txt");
        touch(tmp.path(), "conf/nested/c.json");

        let found = resolve_custom_sources("conf/*.json", tmp.path()).expect("found");
        assert_eq!(found, vec![tmp.path().join("conf/a.json"), tmp.path().join("conf/b.json")]);
    }

    #[test]
    fn double_star_descends() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "conf/a.json");
        touch(tmp.path(), "conf/nested/deeper/c.json");

        let found = resolve_custom_sources("conf/**/*.json", tmp.path()).expect("found");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&tmp.path().join("conf/nested/deeper/c.json")));
    }

    #[test]
    fn no_match_is_source_not_found() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "conf/a.yaml");

        let err = resolve_custom_sources("conf/*.json", tmp.path()).expect_err("no match");
        match err {
            LoadError::SourceNotFound { pattern, cwd, reason } => {
                assert_eq!(pattern, "conf/*.json");
                assert_eq!(cwd, tmp.path());
                assert!(reason.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(resolve_custom_sources("missing.json", tmp.path()).is_err());
    }

    #[test]
    fn invalid_glob_is_source_not_found_with_reason() {
        let tmp = TempDir::new().expect("tmp");
        let err = resolve_custom_sources("conf/[a.json", tmp.path()).expect_err("invalid");
        assert!(matches!(err, LoadError::SourceNotFound { reason: Some(_), .. }));
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob(Path::new("conf/*.json")));
        assert!(is_glob(Path::new("conf/{a,b}.json")));
        assert!(!is_glob(Path::new("conf/a.json")));
    }
}
