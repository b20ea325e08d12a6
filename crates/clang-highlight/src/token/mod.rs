//! Display categories and the raw lexical tokens they are derived from.

mod classify;

use serde::Serialize;

pub use self::classify::{classify, is_keyword, is_operator};

/// Display category of an indexed token.
///
/// Serialized with the lower-case names used by the structured output
/// (`string_literal`, `number_literal`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Whitespace,
    Keyword,
    Name,
    StringLiteral,
    NumberLiteral,
    OtherLiteral,
    Operator,
    Punctuation,
    Comment,
    Preprocessor,
    Variable,
    Other,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 12] = [
        TokenCategory::Whitespace,
        TokenCategory::Keyword,
        TokenCategory::Name,
        TokenCategory::StringLiteral,
        TokenCategory::NumberLiteral,
        TokenCategory::OtherLiteral,
        TokenCategory::Operator,
        TokenCategory::Punctuation,
        TokenCategory::Comment,
        TokenCategory::Preprocessor,
        TokenCategory::Variable,
        TokenCategory::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenCategory::Whitespace => "whitespace",
            TokenCategory::Keyword => "keyword",
            TokenCategory::Name => "name",
            TokenCategory::StringLiteral => "string_literal",
            TokenCategory::NumberLiteral => "number_literal",
            TokenCategory::OtherLiteral => "other_literal",
            TokenCategory::Operator => "operator",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::Comment => "comment",
            TokenCategory::Preprocessor => "preprocessor",
            TokenCategory::Variable => "variable",
            TokenCategory::Other => "other",
        }
    }

    /// Short CSS class used by the markup renderer. Whitespace and
    /// `Other` are emitted without a wrapping span.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenCategory::Whitespace | TokenCategory::Other => None,
            TokenCategory::Keyword => Some("k"),
            TokenCategory::Name => Some("n"),
            TokenCategory::StringLiteral => Some("s"),
            TokenCategory::NumberLiteral => Some("m"),
            TokenCategory::OtherLiteral => Some("l"),
            TokenCategory::Operator => Some("o"),
            TokenCategory::Punctuation => Some("p"),
            TokenCategory::Comment => Some("c"),
            TokenCategory::Preprocessor => Some("cp"),
            TokenCategory::Variable => Some("nv"),
        }
    }
}

impl std::fmt::Display for TokenCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lexical kind as reported by a raw-mode lexer.
///
/// Identifiers are not yet split into keywords and names, and punctuators
/// are not yet split into operators and punctuation; that is the job of
/// [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalKind {
    Whitespace,
    Comment,
    RawIdentifier,
    NumericConstant,
    StringLiteral,
    CharConstant,
    Punctuator,
    Unknown,
}

/// One token of the lexical facts stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    /// Byte offset into the source buffer.
    pub offset: usize,
    /// Byte length.
    pub length: usize,
    pub kind: LexicalKind,
}

impl RawToken {
    pub fn new(
        offset: usize,
        length: usize,
        kind: LexicalKind,
    ) -> Self {
        Self {
            offset,
            length,
            kind,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The token's bytes, or `None` if it does not fit in `source`.
    pub fn text<'a>(
        &self,
        source: &'a [u8],
    ) -> Option<&'a [u8]> {
        source.get(self.offset..self.end())
    }
}
