//! Token types for the TL schema lexer

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // ========== Section markers ==========
    #[token("---functions---")]
    FunctionsSection,
    #[token("---types---")]
    TypesSection,

    // ========== Names and literals ==========
    /// Identifier; dots are part of the name (`auth.sentCode`, `flags.0`)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*")]
    Ident,

    /// Explicit constructor id, `#` followed by hex digits
    #[regex(r"#[0-9a-fA-F]{1,8}")]
    ConstructorId,

    #[regex(r"[0-9]+")]
    Int,

    // ========== Punctuation ==========
    /// Bare `#`, the flags bitmask type
    #[token("#")]
    Hash,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("=")]
    Eq,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,

    // ========== Trivia ==========
    #[regex(r"//[^\n]*")]
    LineComment,

    // ========== Special ==========
    Eof,
    Error,
}

impl TokenKind {
    /// Returns true if this token should be skipped by the parser
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::LineComment)
    }

    /// Returns true for the `---functions---` / `---types---` markers
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Self::FunctionsSection | Self::TypesSection)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FunctionsSection => write!(f, "---functions---"),
            Self::TypesSection => write!(f, "---types---"),
            Self::Ident => write!(f, "identifier"),
            Self::ConstructorId => write!(f, "constructor id"),
            Self::Int => write!(f, "integer"),
            Self::Hash => write!(f, "#"),
            Self::Colon => write!(f, ":"),
            Self::Question => write!(f, "?"),
            Self::Bang => write!(f, "!"),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Eq => write!(f, "="),
            Self::Semicolon => write!(f, ";"),
            Self::Star => write!(f, "*"),
            Self::LineComment => write!(f, "// comment"),
            Self::Eof => write!(f, "end of file"),
            Self::Error => write!(f, "error"),
        }
    }
}
