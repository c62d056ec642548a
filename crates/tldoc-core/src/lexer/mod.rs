//! Lexer for TL schema files
//!
//! The lexer converts schema text into a flat token stream, handling:
//! - Qualified identifiers (`auth.sentCode`, `flags.0`)
//! - Explicit constructor ids (`#1cb5c415`)
//! - Section markers and line comments
//! - Source location tracking

#![allow(clippy::cast_possible_truncation)] // Schema files larger than 4GB are unsupported

mod span;
mod token;

pub use span::{LineIndex, Location, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span, and source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub lexeme: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

/// A lexer error with location information
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// The TL schema lexer
pub struct Lexer<'source> {
    source: &'source str,
    /// Current position in the source (byte offset)
    position: usize,
    errors: Vec<SpannedError>,
}

impl<'source> Lexer<'source> {
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.collect_all();
        (tokens, lexer.errors)
    }

    /// Collect all tokens up to and including `Eof`
    pub fn collect_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        let len = self.source.len() as u32;
        let eof = move || Token::new(TokenKind::Eof, Span::new(len, len), "");

        let remaining = &self.source[self.position..];
        let mut logos_lexer = TokenKind::lexer(remaining);

        match logos_lexer.next() {
            Some(Ok(kind)) => {
                let span = Span::offset_range(self.position, logos_lexer.span());
                let lexeme = logos_lexer.slice().to_string();
                self.position = span.end as usize;
                Token::new(kind, span, lexeme)
            }
            Some(Err(())) => {
                // Error recovery: skip the invalid character
                let span_range = logos_lexer.span();
                let start = self.position + span_range.start;
                let Some(invalid) = self.source[start..].chars().next() else {
                    return eof();
                };
                let end = start + invalid.len_utf8();
                self.position = end;

                let span = Span::new(start as u32, end as u32);
                self.errors
                    .push(SpannedError::new(LexError::UnexpectedChar(invalid), span));
                Token::new(TokenKind::Error, span, invalid.to_string())
            }
            None => {
                self.position = self.source.len();
                eof()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_constructor() {
        let (tokens, errors) = Lexer::tokenize("inputPeerEmpty#7f3b18ea = InputPeer;");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, "inputPeerEmpty");
        assert_eq!(tokens[1].kind, TokenKind::ConstructorId);
        assert_eq!(tokens[1].lexeme, "#7f3b18ea");
        assert_eq!(tokens[2].kind, TokenKind::Eq);
        assert_eq!(tokens[3].lexeme, "InputPeer");
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_flag_argument_lexes_as_one_ident() {
        assert_eq!(
            kinds("silent:flags.5?true"),
            vec![
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Question,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bare_hash_and_generic_definition() {
        assert_eq!(
            kinds("{X:Type} flags:# query:!X"),
            vec![
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::RBrace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Hash,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Bang,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_sections_and_comments() {
        let (tokens, errors) = Lexer::tokenize("// LAYER 66\n---functions---\n---types---");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::LineComment);
        assert_eq!(tokens[0].lexeme, "// LAYER 66");
        assert_eq!(tokens[1].kind, TokenKind::FunctionsSection);
        assert_eq!(tokens[2].kind, TokenKind::TypesSection);
    }

    #[test]
    fn test_spans_are_absolute() {
        let (tokens, _) = Lexer::tokenize("a = B;\nc = D;");
        let c = tokens.iter().find(|t| t.lexeme == "c").unwrap();
        assert_eq!(c.span, Span::new(7, 8));
    }

    #[test]
    fn test_invalid_character_recovers() {
        let (tokens, errors) = Lexer::tokenize("a @ b");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error, LexError::UnexpectedChar('@'));
        assert_eq!(errors[0].span, Span::new(2, 3));
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[2].lexeme, "b");
    }
}
