//! Top-level error type

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::docs::ConfigError;
use crate::schema::SchemaError;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", format_schema_errors(.0))]
    Schema(Vec<SchemaError>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("function '{name}' does not declare a result type")]
    MissingResult { name: String },
}

impl DocsError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn format_schema_errors(errors: &[SchemaError]) -> String {
    match errors {
        [] => "invalid schema".to_string(),
        [error] => format!("invalid schema: {}", error),
        [first, rest @ ..] => format!("invalid schema: {} (and {} more)", first, rest.len()),
    }
}
