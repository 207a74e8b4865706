use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use allure_tree::analyzer::Analyzer;
use allure_tree::cli;
use allure_tree::config::{find_default_config, load_config_file, PartialConfig};
use allure_tree::error::IoError;
use allure_tree::logging::{self, Verbosity};
use allure_tree::output::OutputFormatter;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    match run(&args) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether anything was reported, diagnostics or files that could
/// not be checked in full.
fn run(args: &cli::Args) -> Result<bool> {
    args.validate().context("Invalid arguments")?;

    let config_path = args
        .config
        .clone()
        .or_else(|| find_default_config(Path::new(".")));
    let file_layer = match config_path {
        Some(path) => load_config_file(&path).context("Invalid configuration")?,
        None => PartialConfig::default(),
    };
    let config = file_layer.merge(args.config_overrides()).into_config();
    tracing::debug!(config = ?config, "resolved configuration");

    let analyzer = Analyzer::new(&config);
    let results = analyzer
        .analyze_paths(&args.paths)
        .context("Failed to collect source files")?;

    let report = OutputFormatter::format(&results, args.format)?;
    match &args.output_file {
        Some(path) => std::fs::write(path, &report)
            .map_err(|e| IoError::write_error(path, e))
            .context("Failed to write report")?,
        None => print!("{report}"),
    }

    Ok(results
        .iter()
        .any(|r| r.diagnostic_count() > 0 || r.has_errors()))
}
