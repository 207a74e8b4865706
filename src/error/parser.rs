use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("failed to set parser language: {language}")]
    LanguageSetupFailed { language: String },

    #[error("failed to parse source code in {path}")]
    ParseFailed { path: PathBuf },

    #[error("invalid syntax in {path} at {line}:{column}, checked the recovered tree")]
    InvalidSyntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },
}

impl ParserError {
    pub fn language_setup_failed(language: impl Into<String>) -> Self {
        Self::LanguageSetupFailed {
            language: language.into(),
        }
    }

    pub fn parse_failed(path: impl Into<PathBuf>) -> Self {
        Self::ParseFailed { path: path.into() }
    }

    pub fn invalid_syntax(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self::InvalidSyntax {
            path: path.into(),
            line,
            column,
        }
    }
}
