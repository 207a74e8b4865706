//! Runs the registered checks over Python sources.
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace, warn};

use crate::checks::{default_visitors, Diagnostic, Visitor};
use crate::config::Config;
use crate::discovery::collect_python_files;
use crate::error::{Error, IoError, ParserError, Result};
use crate::syntax::{build_module, parse_python, Module};

#[derive(Debug, Default)]
pub struct FileResult {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    /// Problems that kept the file from being checked in full.
    pub errors: Vec<Error>,
}

impl FileResult {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            diagnostics: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<Error>) {
        self.errors.push(error.into());
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct Analyzer<'a> {
    visitors: Vec<Box<dyn Visitor + 'a>>,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            visitors: default_visitors(config),
        }
    }

    pub fn with_visitors(visitors: Vec<Box<dyn Visitor + 'a>>) -> Self {
        Self { visitors }
    }

    /// Every visitor sees every class. Diagnostics come back ordered by
    /// position.
    pub fn analyze_module(&self, module: &Module) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for class in &module.classes {
            for visitor in &self.visitors {
                visitor.visit_class(class, &mut diagnostics);
            }
        }
        diagnostics.sort_by_key(|d| d.location);
        diagnostics
    }

    /// Source need not be valid UTF-8. Syntax errors are recorded and the
    /// recovered tree is still checked.
    pub fn analyze_source(&self, source: impl AsRef<[u8]>, path: &Path) -> FileResult {
        let source = source.as_ref();
        let mut result = FileResult::new(path);

        let tree = match parse_python(source, path) {
            Ok(tree) => tree,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to parse");
                result.add_error(e);
                return result;
            }
        };

        let module = build_module(&tree, source);
        if let Some(location) = module.syntax_error {
            let syntax_error = ParserError::invalid_syntax(path, location.line, location.column);
            warn!(error = %syntax_error, "syntax error");
            result.add_error(syntax_error);
        }

        result.diagnostics = self.analyze_module(&module);
        debug!(
            path = %path.display(),
            classes = module.classes.len(),
            diagnostics = result.diagnostic_count(),
            "analysis complete"
        );
        result
    }

    /// Read failures are recorded on the result rather than returned.
    pub fn analyze_file(&self, path: &Path) -> FileResult {
        trace!(path = %path.display(), "reading file");
        match fs::read(path) {
            Ok(source) => self.analyze_source(source, path),
            Err(e) => {
                let read_error = IoError::read_error(path, e);
                error!(error = %read_error, "skipping file");
                let mut result = FileResult::new(path);
                result.add_error(read_error);
                result
            }
        }
    }

    pub fn analyze_paths(&self, paths: &[PathBuf]) -> Result<Vec<FileResult>> {
        let files = collect_python_files(paths)?;
        Ok(files.iter().map(|file| self.analyze_file(file)).collect())
    }
}
