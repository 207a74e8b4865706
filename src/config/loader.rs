use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::PartialConfig;
use crate::error::{ConfigError, Result};

/// Looked up in the working directory when no config file is given.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["allure-tree.yaml", "allure-tree.yml", "allure-tree.json"];

pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<PartialConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading config file");

    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e.to_string()))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let partial = match extension {
        "json" => serde_json::from_str(&content)
            .map_err(|e| ConfigError::parse_error(path, e.to_string()))?,
        "yaml" | "yml" => parse_yaml(path, &content)?,
        _ => return Err(ConfigError::unsupported_format(extension).into()),
    };
    Ok(partial)
}

// serde_yaml rejects an empty document, which is a valid empty config here.
fn parse_yaml(path: &Path, content: &str) -> std::result::Result<PartialConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(PartialConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))
}

pub fn find_default_config(dir: &Path) -> Option<PathBuf> {
    let found = DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file());
    trace!(dir = %dir.display(), found = ?found, "searched for default config");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allure-tree.yaml");
        fs::write(
            &path,
            "class-tag-tree: feature>story\ntest-class-name: \"*TestCase*\"\nstrict-tree: true\n",
        )
        .unwrap();

        let partial = load_config_file(&path).unwrap();
        assert_eq!(
            partial,
            PartialConfig {
                class_tag_tree: Some("feature>story".to_string()),
                test_class_name: Some("*TestCase*".to_string()),
                strict_tree: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allure-tree.json");
        fs::write(&path, r#"{"method-tag-tree": "title", "test-method-name": "check_"}"#).unwrap();

        let config = load_config_file(&path).unwrap().into_config();
        assert_eq!(config.method_tag_tree.as_deref(), Some("title"));
        assert_eq!(config.test_method_name, "check_");
    }

    #[test]
    fn test_empty_yaml_is_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allure-tree.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_config_file(&path).unwrap(), PartialConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allure-tree.yaml");
        fs::write(&path, "class_tag_tree: story\n").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allure-tree.toml");
        fs::write(&path, "").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_file("/nonexistent/allure-tree.yaml").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_find_default_config_order() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(find_default_config(temp_dir.path()), None);

        fs::write(temp_dir.path().join("allure-tree.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("allure-tree.yml"), "").unwrap();

        assert_eq!(
            find_default_config(temp_dir.path()),
            Some(temp_dir.path().join("allure-tree.yml"))
        );
    }
}
