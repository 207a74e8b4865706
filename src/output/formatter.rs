use anyhow::Result;
use serde::Serialize;

use crate::analyzer::FileResult;
use crate::checks::Diagnostic;
use crate::cli::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub code: String,
    pub name: String,
    pub tree: String,
    pub deco: String,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn from_diagnostic(file: &str, diagnostic: &Diagnostic) -> Self {
        DiagnosticRecord {
            file: file.to_string(),
            line: diagnostic.location.line,
            column: diagnostic.location.column,
            code: diagnostic.code().to_string(),
            name: diagnostic.name.clone(),
            tree: diagnostic.tree.clone(),
            deco: diagnostic.deco.clone(),
            message: diagnostic.message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub files_scanned: usize,
    pub total_diagnostics: usize,
    pub diagnostics: Vec<DiagnosticRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(results: &[FileResult], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::format_text(results)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&Self::build_output(results))?),
        }
    }

    /// One `path:line:col: CODE message` line per diagnostic, preceded by a
    /// `path: error: ...` line for each file that was not checked in full.
    pub fn format_text(results: &[FileResult]) -> String {
        let mut text = String::new();
        for result in results {
            let file = result.path.display().to_string();
            for error in &result.errors {
                text.push_str(&format!("{file}: error: {error}\n"));
            }
            for diagnostic in &result.diagnostics {
                let r = DiagnosticRecord::from_diagnostic(&file, diagnostic);
                text.push_str(&format!(
                    "{}:{}:{}: {} {}\n",
                    r.file, r.line, r.column, r.code, r.message
                ));
            }
        }
        text
    }

    pub fn build_output(results: &[FileResult]) -> JsonOutput {
        let diagnostics: Vec<DiagnosticRecord> = Self::records(results).collect();

        let errors = results
            .iter()
            .flat_map(|r| r.errors.iter().map(|e| e.to_string()))
            .collect();

        JsonOutput {
            files_scanned: results.len(),
            total_diagnostics: diagnostics.len(),
            diagnostics,
            errors,
        }
    }

    fn records(results: &[FileResult]) -> impl Iterator<Item = DiagnosticRecord> + '_ {
        results.iter().flat_map(|r| {
            let file = r.path.display().to_string();
            r.diagnostics
                .iter()
                .map(move |d| DiagnosticRecord::from_diagnostic(&file, d))
        })
    }
}
