//! Schema parse errors

use crate::lexer::{Location, Span, TokenKind};
use thiserror::Error;

/// A schema error with location information
#[derive(Debug, Clone)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    /// Byte range of the offending token
    pub span: Span,
    /// Line and column of `span.start`
    pub location: Location,
}

impl SchemaError {
    #[must_use]
    pub fn new(kind: SchemaErrorKind, span: Span, location: Location) -> Self {
        Self {
            kind,
            span,
            location,
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)
    }
}

impl std::error::Error for SchemaError {}

/// The kind of schema error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaErrorKind {
    #[error("unexpected token: found {found}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        expected: &'static str,
    },

    #[error("unexpected end of file inside a definition")]
    UnexpectedEof,

    #[error("definition '{0}' has no result type")]
    MissingResult(String),

    #[error("invalid flag reference '{0}'")]
    InvalidFlag(String),

    #[error("invalid constructor id '{0}'")]
    InvalidId(String),

    #[error("{0}")]
    Lex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_line_and_column() {
        let error = SchemaError::new(
            SchemaErrorKind::MissingResult("getState".to_string()),
            Span::new(20, 28),
            Location::new(3, 5),
        );
        assert_eq!(
            error.to_string(),
            "definition 'getState' has no result type at 3:5"
        );
    }
}
