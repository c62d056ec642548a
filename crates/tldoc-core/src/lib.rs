//! tldoc - cross-linked HTML reference for TL schemas
//!
//! This crate provides:
//! - Lexer: tokenization of `.tl` schema files
//! - Schema: definitions, arguments and constructor ids
//! - Docs: naming, page locations, cross references and HTML output
//!
//! ```no_run
//! use std::path::Path;
//! use tldoc_core::{generate_from_file, DocsConfig};
//!
//! let report = generate_from_file(Path::new("scheme.tl"), DocsConfig::default())?;
//! println!("{} pages written", report.total_pages());
//! # Ok::<(), tldoc_core::DocsError>(())
//! ```

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of schema text
pub mod lexer;

/// Schema model and parser
pub mod schema;

/// Documentation generation
pub mod docs;

mod error;

use std::path::Path;

pub use docs::{DocsConfig, DocsGenerator, GenerationReport};
pub use error::DocsError;
pub use schema::{Schema, SchemaObject, SchemaParser};

/// Parse `schema_path` and regenerate the whole reference from it
pub fn generate_from_file(
    schema_path: &Path,
    config: DocsConfig,
) -> Result<GenerationReport, DocsError> {
    let schema = SchemaParser::parse_file(schema_path)?;
    DocsGenerator::new(config).generate(&schema)
}
