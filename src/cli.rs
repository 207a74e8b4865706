use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::PartialConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "allure-tree")]
#[command(version)]
#[command(about = "Check that pytest classes and methods carry the required allure decorators", long_about = None)]
pub struct Args {
    /// Files or directories to check
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Config file (YAML or JSON). Defaults to allure-tree.{yaml,yml,json} in the working directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tags required on test classes, separated by '>' [default: feature>story>label>tag]
    #[arg(long, value_name = "TREE")]
    pub class_tag_tree: Option<String>,

    /// Tags required on test methods, separated by '>' [default: title>tag]
    #[arg(long, value_name = "TREE")]
    pub method_tag_tree: Option<String>,

    /// Prefix or glob pattern selecting test classes [default: Test*]
    #[arg(long, value_name = "PATTERN")]
    pub test_class_name: Option<String>,

    /// Prefix or glob pattern selecting test methods [default: test_*]
    #[arg(long, value_name = "PATTERN")]
    pub test_method_name: Option<String>,

    /// Use strict tree. Unconditionally checks for tags in all tests
    #[arg(long)]
    pub strict_tree: bool,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        for path in &self.paths {
            validate_path(path)?;
        }
        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                anyhow::bail!("Config file does not exist: {}", config_path.display());
            }
        }
        Ok(())
    }

    /// The configuration layer given on the command line.
    pub fn config_overrides(&self) -> PartialConfig {
        PartialConfig {
            class_tag_tree: self.class_tag_tree.clone(),
            method_tag_tree: self.method_tag_tree.clone(),
            test_class_name: self.test_class_name.clone(),
            test_method_name: self.test_method_name.clone(),
            strict_tree: self.strict_tree.then_some(true),
        }
    }
}

pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    } else if path.is_dir() {
        std::fs::metadata(path)
            .with_context(|| format!("Cannot read directory: {}", path.display()))?;
    } else {
        anyhow::bail!("Path is neither a file nor a directory: {}", path.display());
    }

    Ok(())
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}
