//! Allure Tree
//!
//! Checks that pytest test classes and test methods carry the allure
//! decorators listed in a configured tag tree. Python sources are parsed with
//! Tree-sitter and reduced to a typed view of classes, methods and their
//! decorators before the checks run.

pub mod analyzer;
pub mod checks;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod resolver;
pub mod syntax;

pub use analyzer::{Analyzer, FileResult};
pub use checks::{Diagnostic, ErrorKind};
pub use config::Config;
