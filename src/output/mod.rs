mod formatter;

pub use formatter::{DiagnosticRecord, JsonOutput, OutputFormatter};
