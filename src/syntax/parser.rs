use std::path::Path;
use tracing::trace;
use tree_sitter::{Parser, Tree};

use crate::error::ParserError;

pub fn parse_python(source: &[u8], path: &Path) -> Result<Tree, ParserError> {
    trace!(path = %path.display(), bytes = source.len(), "parsing python source");

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|_| ParserError::language_setup_failed("python"))?;

    parser
        .parse(source, None)
        .ok_or_else(|| ParserError::parse_failed(path))
}
