//! Run configuration.
//!
//! [`Config`] is built once per run and shared by reference with every
//! check. Values come from, in order of precedence, the command line, a
//! config file, and the defaults below.
mod loader;

pub use loader::{find_default_config, load_config_file, DEFAULT_CONFIG_FILES};

use serde::Deserialize;

pub const DEFAULT_CLASS_TAG_TREE: &str = "feature>story>label>tag";
pub const DEFAULT_METHOD_TAG_TREE: &str = "title>tag";
pub const DEFAULT_TEST_CLASS_NAME: &str = "Test*";
pub const DEFAULT_TEST_METHOD_NAME: &str = "test_*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tags required on test classes; `None` disables the class check.
    pub class_tag_tree: Option<String>,
    /// Tags required on test methods; `None` disables the method check.
    pub method_tag_tree: Option<String>,
    /// Prefix or glob selecting test classes.
    pub test_class_name: String,
    /// Prefix or glob selecting test methods.
    pub test_method_name: String,
    /// Report definitions that carry no allure decorator at all.
    pub strict_tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_tag_tree: Some(DEFAULT_CLASS_TAG_TREE.to_string()),
            method_tag_tree: Some(DEFAULT_METHOD_TAG_TREE.to_string()),
            test_class_name: DEFAULT_TEST_CLASS_NAME.to_string(),
            test_method_name: DEFAULT_TEST_METHOD_NAME.to_string(),
            strict_tree: false,
        }
    }
}

/// One layer of configuration, as read from a config file or the command
/// line. Unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialConfig {
    pub class_tag_tree: Option<String>,
    pub method_tag_tree: Option<String>,
    pub test_class_name: Option<String>,
    pub test_method_name: Option<String>,
    pub strict_tree: Option<bool>,
}

impl PartialConfig {
    /// Layers `overrides` on top of `self`.
    pub fn merge(self, overrides: PartialConfig) -> PartialConfig {
        PartialConfig {
            class_tag_tree: overrides.class_tag_tree.or(self.class_tag_tree),
            method_tag_tree: overrides.method_tag_tree.or(self.method_tag_tree),
            test_class_name: overrides.test_class_name.or(self.test_class_name),
            test_method_name: overrides.test_method_name.or(self.test_method_name),
            strict_tree: overrides.strict_tree.or(self.strict_tree),
        }
    }

    pub fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            class_tag_tree: tag_tree_or(self.class_tag_tree, defaults.class_tag_tree),
            method_tag_tree: tag_tree_or(self.method_tag_tree, defaults.method_tag_tree),
            test_class_name: self.test_class_name.unwrap_or(defaults.test_class_name),
            test_method_name: self.test_method_name.unwrap_or(defaults.test_method_name),
            strict_tree: self.strict_tree.unwrap_or(defaults.strict_tree),
        }
    }
}

// An explicitly empty tag tree turns the check off.
fn tag_tree_or(value: Option<String>, default: Option<String>) -> Option<String> {
    match value {
        Some(tree) if tree.is_empty() => None,
        Some(tree) => Some(tree),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.class_tag_tree.as_deref(), Some("feature>story>label>tag"));
        assert_eq!(config.method_tag_tree.as_deref(), Some("title>tag"));
        assert_eq!(config.test_class_name, "Test*");
        assert_eq!(config.test_method_name, "test_*");
        assert!(!config.strict_tree);
    }

    #[test]
    fn test_empty_partial_is_default() {
        assert_eq!(PartialConfig::default().into_config(), Config::default());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = PartialConfig {
            class_tag_tree: Some("feature>story".to_string()),
            test_class_name: Some("*Suite".to_string()),
            strict_tree: Some(true),
            ..Default::default()
        };
        let cli = PartialConfig {
            class_tag_tree: Some("story".to_string()),
            ..Default::default()
        };

        let config = file.merge(cli).into_config();
        assert_eq!(config.class_tag_tree.as_deref(), Some("story"));
        assert_eq!(config.method_tag_tree.as_deref(), Some("title>tag"));
        assert_eq!(config.test_class_name, "*Suite");
        assert!(config.strict_tree);
    }

    #[test]
    fn test_empty_tag_tree_disables_check() {
        let partial = PartialConfig {
            method_tag_tree: Some(String::new()),
            ..Default::default()
        };
        let config = partial.into_config();
        assert_eq!(config.method_tag_tree, None);
        assert!(config.class_tag_tree.is_some());
    }
}
