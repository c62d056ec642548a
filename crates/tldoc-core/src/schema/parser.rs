//! Parser for TL schema files
//!
//! Definitions have the form `name[#id] arg* = Result;`. Section markers
//! switch between constructors (`---types---`, the initial state) and
//! functions (`---functions---`).
//!
//! # Example
//!
//! ```
//! use tldoc_core::schema::SchemaParser;
//!
//! let source = "
//!     user#2e13f4c3 id:long first_name:string = User;
//!     ---functions---
//!     users.getUsers#0d91a548 id:Vector<InputUser> = Vector<User>;
//! ";
//! let schema = SchemaParser::parse_str(source).unwrap();
//! assert_eq!(schema.objects.len(), 2);
//! assert!(schema.objects[1].is_function);
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::{SchemaError, SchemaErrorKind};
use super::{Argument, FlagBit, Schema, SchemaObject};
use crate::error::DocsError;
use crate::lexer::{Lexer, LineIndex, Span, SpannedError, Token, TokenKind};

/// Result type for parsing operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// The TL schema parser
pub struct SchemaParser {
    tokens: Vec<Token>,
    /// Current position in the token stream
    position: usize,
    line_index: LineIndex,
    errors: Vec<SchemaError>,
    lex_errors: Vec<SpannedError>,
    /// Whether definitions are currently in the functions section
    is_function: bool,
    layer: Option<u32>,
}

impl SchemaParser {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let (tokens, lex_errors) = Lexer::tokenize(source);
        Self {
            tokens,
            position: 0,
            line_index: LineIndex::new(source),
            errors: Vec::new(),
            lex_errors,
            is_function: false,
            layer: None,
        }
    }

    /// Parse schema text, collecting every error in the file
    pub fn parse_str(source: &str) -> Result<Schema, Vec<SchemaError>> {
        let mut parser = SchemaParser::new(source);
        let schema = parser.schema();
        let errors = parser.all_errors();
        if errors.is_empty() {
            Ok(schema)
        } else {
            Err(errors)
        }
    }

    /// Read and parse a schema file
    pub fn parse_file(path: &Path) -> Result<Schema, DocsError> {
        let source = fs::read_to_string(path).map_err(|source| DocsError::io(path, source))?;
        let schema = Self::parse_str(&source).map_err(DocsError::Schema)?;
        debug!(
            path = %path.display(),
            objects = schema.objects.len(),
            "parsed schema"
        );
        Ok(schema)
    }

    /// Lex errors followed by parse errors
    fn all_errors(&self) -> Vec<SchemaError> {
        let mut errors: Vec<SchemaError> = self
            .lex_errors
            .iter()
            .map(|e| self.error_at(SchemaErrorKind::Lex(e.error.to_string()), e.span))
            .collect();
        errors.extend(self.errors.iter().cloned());
        errors
    }

    // ==================== Token Management ====================

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with Eof
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind.clone()
    }

    fn is_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Advance to the next token, skipping trivia
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        self.skip_trivia();
        token
    }

    /// Skip comments (recording the layer) and tokens the lexer rejected
    fn skip_trivia(&mut self) {
        while self.position < self.tokens.len() {
            let token = &self.tokens[self.position];
            match token.kind {
                TokenKind::LineComment => {
                    if let Some(layer) = layer_from_comment(&token.lexeme) {
                        self.layer = Some(layer);
                    }
                }
                TokenKind::Error => {}
                _ => break,
            }
            self.position += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> SchemaResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Kind of the next non-trivia token after the current one
    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.position + 1..]
            .iter()
            .find(|t| !t.kind.is_trivia() && t.kind != TokenKind::Error)
            .map(|t| t.kind.clone())
    }

    fn error_at(&self, kind: SchemaErrorKind, span: Span) -> SchemaError {
        SchemaError::new(kind, span, self.line_index.location(span.start))
    }

    fn unexpected(&self, expected: &'static str) -> SchemaError {
        let token = self.current();
        let kind = if token.kind == TokenKind::Eof {
            SchemaErrorKind::UnexpectedEof
        } else {
            SchemaErrorKind::UnexpectedToken {
                found: token.kind.clone(),
                expected,
            }
        };
        self.error_at(kind, token.span)
    }

    /// Skip to the end of the current definition after an error
    fn synchronize(&mut self) {
        while !self.is_eof() && !self.current_kind().is_section() {
            if self.advance().kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    // ==================== Schema Parsing ====================

    fn schema(&mut self) -> Schema {
        self.skip_trivia();

        let mut objects = Vec::new();
        while !self.is_eof() {
            match self.current_kind() {
                TokenKind::FunctionsSection => {
                    self.advance();
                    self.is_function = true;
                }
                TokenKind::TypesSection => {
                    self.advance();
                    self.is_function = false;
                }
                _ => match self.definition() {
                    Ok(Some(object)) => objects.push(object),
                    Ok(None) => {}
                    Err(e) => {
                        self.errors.push(e);
                        self.synchronize();
                    }
                },
            }
        }

        Schema {
            objects,
            layer: self.layer,
        }
    }

    /// Parse one definition; `None` for skipped built-in declarations
    fn definition(&mut self) -> SchemaResult<Option<SchemaObject>> {
        let name = self.expect(TokenKind::Ident, "definition name")?;

        let explicit_id = match self.eat(TokenKind::ConstructorId) {
            Some(token) => Some(self.constructor_id(&token)?),
            None => None,
        };

        // `int ? = Int;`
        if self.check(TokenKind::Question) {
            return Ok(self.skip_builtin(&name));
        }

        let mut args = Vec::new();
        while !self.check(TokenKind::Eq) {
            match self.current_kind() {
                TokenKind::LBrace => args.push(self.generic_definition()?),
                TokenKind::Ident => args.push(self.argument()?),
                // `vector {t:Type} # [ t ] = Vector t;`, `int128 4*[ int ] = Int128;`
                TokenKind::Hash | TokenKind::LBracket | TokenKind::Int | TokenKind::Star => {
                    return Ok(self.skip_builtin(&name));
                }
                _ => return Err(self.unexpected("argument or '='")),
            }
        }
        self.advance();

        if self.check(TokenKind::Semicolon) {
            return Err(self.error_at(SchemaErrorKind::MissingResult(name.lexeme), name.span));
        }
        let result = self.type_reference("result type")?;

        // `= Vector t;`
        if self.check(TokenKind::Ident) {
            return Ok(self.skip_builtin(&name));
        }
        self.expect(TokenKind::Semicolon, "';'")?;

        let mut object = SchemaObject::new(&name.lexeme, self.is_function, result);
        object.args = args;
        object.id = explicit_id.unwrap_or_else(|| object.infer_id());
        Ok(Some(object))
    }

    fn skip_builtin(&mut self, name: &Token) -> Option<SchemaObject> {
        debug!(name = %name.lexeme, "skipping built-in definition");
        self.synchronize();
        None
    }

    fn constructor_id(&self, token: &Token) -> SchemaResult<u32> {
        u32::from_str_radix(&token.lexeme[1..], 16).map_err(|_| {
            self.error_at(
                SchemaErrorKind::InvalidId(token.lexeme.clone()),
                token.span,
            )
        })
    }

    /// `{X:Type}`
    fn generic_definition(&mut self) -> SchemaResult<Argument> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let name = self.expect(TokenKind::Ident, "generic parameter name")?;
        self.expect(TokenKind::Colon, "':'")?;
        let ty = self.expect(TokenKind::Ident, "generic parameter type")?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Argument::generic_definition(name.lexeme, ty.lexeme))
    }

    /// `name:#`, `name:flags.N?Type`, `name:!X`, `name:Vector<T>`, `name:Type`
    fn argument(&mut self) -> SchemaResult<Argument> {
        let name = self.expect(TokenKind::Ident, "argument name")?;
        self.expect(TokenKind::Colon, "':'")?;

        if self.eat(TokenKind::Hash).is_some() {
            return Ok(Argument::flag_indicator(name.lexeme));
        }

        let flag = if self.check(TokenKind::Ident) && self.peek_kind() == Some(TokenKind::Question)
        {
            let token = self.advance();
            self.advance();
            Some(self.flag_bit(&token)?)
        } else {
            None
        };

        let is_generic = self.eat(TokenKind::Bang).is_some();
        let ty = self.expect(TokenKind::Ident, "argument type")?;

        let mut arg = if self.eat(TokenKind::Lt).is_some() {
            if !ty.lexeme.eq_ignore_ascii_case("vector") {
                return Err(self.error_at(
                    SchemaErrorKind::UnexpectedToken {
                        found: TokenKind::Lt,
                        expected: "argument name (only Vector takes a parameter)",
                    },
                    ty.span,
                ));
            }
            let element = self.expect(TokenKind::Ident, "vector element type")?;
            self.expect(TokenKind::Gt, "'>'")?;
            let mut arg = Argument::new(name.lexeme, element.lexeme).vector();
            arg.bare_vector = ty.lexeme.starts_with('v');
            arg
        } else {
            Argument::new(name.lexeme, ty.lexeme)
        };
        arg.is_generic = is_generic;
        arg.flag = flag;
        Ok(arg)
    }

    /// `flags.5` from `flags.5?Type`
    fn flag_bit(&self, token: &Token) -> SchemaResult<FlagBit> {
        token
            .lexeme
            .rsplit_once('.')
            .and_then(|(field, index)| {
                let index = index.parse().ok()?;
                Some(FlagBit {
                    field: field.to_string(),
                    index,
                })
            })
            .ok_or_else(|| {
                self.error_at(
                    SchemaErrorKind::InvalidFlag(token.lexeme.clone()),
                    token.span,
                )
            })
    }

    /// `Type` or `Vector<Type>`, kept verbatim
    fn type_reference(&mut self, expected: &'static str) -> SchemaResult<String> {
        let ty = self.expect(TokenKind::Ident, expected)?;
        if self.eat(TokenKind::Lt).is_some() {
            let element = self.expect(TokenKind::Ident, "vector element type")?;
            self.expect(TokenKind::Gt, "'>'")?;
            Ok(format!("{}<{}>", ty.lexeme, element.lexeme))
        } else {
            Ok(ty.lexeme)
        }
    }
}

/// `// LAYER 66` -> 66
fn layer_from_comment(comment: &str) -> Option<u32> {
    comment
        .trim_start_matches('/')
        .trim()
        .strip_prefix("LAYER")?
        .trim()
        .parse()
        .ok()
}
