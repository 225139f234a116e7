//! Reading a single config source into a `ConfigValue`

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Data format of a config source, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
    Yaml,
}

impl SourceFormat {
    /// `.toml`, `.yaml`/`.yml`; anything else (including `.conf`) is JSON.
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "toml" => SourceFormat::Toml,
            "yaml" | "yml" => SourceFormat::Yaml,
            _ => SourceFormat::Json,
        }
    }
}

/// Parse source text; the error is a human-readable reason.
pub fn parse_source(content: &str, format: SourceFormat) -> Result<Value, String> {
    match format {
        SourceFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {}", e))
        }
        SourceFormat::Toml => {
            toml::from_str::<Value>(content).map_err(|e| format!("Invalid TOML: {}", e))
        }
        SourceFormat::Yaml => {
            serde_yaml::from_str::<Value>(content).map_err(|e| format!("Invalid YAML: {}", e))
        }
    }
}

pub fn read_source(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| unreadable(path, e.to_string()))?;
    parse_source(&content, SourceFormat::from_path(path)).map_err(|reason| unreadable(path, reason))
}

pub async fn read_source_async(path: &Path) -> Result<Value, LoadError> {
    let content =
        tokio::fs::read_to_string(path).await.map_err(|e| unreadable(path, e.to_string()))?;
    parse_source(&content, SourceFormat::from_path(path)).map_err(|reason| unreadable(path, reason))
}

fn unreadable(path: &Path, reason: String) -> LoadError {
    LoadError::SourceUnreadable { path: path.to_path_buf(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.toml")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("a.YML")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("a.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("app.conf")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("app.conf.json")), SourceFormat::Json);
    }

    #[test]
    fn all_formats_produce_the_same_tree() {
        let expected = json!({"server": {"port": 8080, "hosts": ["a", "b"]}});
        let json_src = r#"{"server": {"port": 8080, "hosts": ["a", "b"]}}"#;
        let toml_src = "[server]\nport = 8080\nhosts = [\"a\", \"b\"]\n";
        let yaml_src = "server:\n  port: 8080\n  hosts:\n    - a\n    - b\n";

        assert_eq!(parse_source(json_src, SourceFormat::Json).expect("json"), expected);
        assert_eq!(parse_source(toml_src, SourceFormat::Toml).expect("toml"), expected);
        assert_eq!(parse_source(yaml_src, SourceFormat::Yaml).expect("yaml"), expected);
    }

    #[test]
    fn invalid_content_names_the_format() {
        let reason = parse_source("{ nope", SourceFormat::Json).expect_err("invalid");
        assert!(reason.starts_with("Invalid JSON"));
    }

    #[test]
    fn read_errors_carry_the_path() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ nope").expect("write");

        let err = read_source(&path).expect_err("broken");
        match err {
            LoadError::SourceUnreadable { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }

        let missing = read_source(&tmp.path().join("missing.json")).expect_err("missing");
        assert!(matches!(missing, LoadError::SourceUnreadable { .. }));
    }

    #[tokio::test]
    async fn async_read_matches_sync_read() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.conf.yaml");
        fs::write(&path, "port: 1\n").expect("write");

        let sync_value = read_source(&path).expect("sync");
        let async_value = read_source_async(&path).await.expect("async");
        assert_eq!(sync_value, async_value);
        assert_eq!(async_value, json!({"port": 1}));
    }
}
