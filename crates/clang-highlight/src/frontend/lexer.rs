//! Raw-mode lexer for C-family sources.
//!
//! Produces one [`RawToken`] per preprocessing token, comments included and
//! whitespace dropped. Keywords are not distinguished from identifiers here;
//! that is left to classification.

use logos::Logos;

use crate::token::{LexicalKind, RawToken};

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = ())]
enum LexToken {
    #[regex(r"([ \t\r\n\f\x0B]|\\\r?\n)+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    #[regex(r"\.?[0-9]([0-9a-zA-Z_.']|[eEpP][+-])*")]
    Number,

    #[regex(r#"(u8|u|U|L)?"([^"\\\n]|\\[\s\S])*""#)]
    String,

    #[regex(r#"(u8|u|U|L)?R""#, raw_string)]
    RawString,

    #[regex(r#"(u8|u|U|L)?'([^'\\\n]|\\[\s\S])+'"#)]
    Char,

    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token("(")]
    #[token(")")]
    #[token(";")]
    #[token(":")]
    #[token("::")]
    #[token(",")]
    #[token(".")]
    #[token("...")]
    #[token(".*")]
    #[token("->")]
    #[token("->*")]
    #[token("?")]
    #[token("#")]
    #[token("##")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("&")]
    #[token("|")]
    #[token("~")]
    #[token("!")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("^=")]
    #[token("&=")]
    #[token("|=")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    #[token("&&")]
    #[token("||")]
    #[token("<<")]
    #[token(">>")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("++")]
    #[token("--")]
    Punctuator,
}

/// Finish a raw string literal after its `R"` prefix: read the delimiter up
/// to `(`, then consume through the matching `)delimiter"`.
fn raw_string(lex: &mut logos::Lexer<'_, LexToken>) -> bool {
    let rest = lex.remainder();
    let Some(open) = rest.find('(') else {
        return false;
    };
    let delimiter = &rest[..open];
    if delimiter.len() > 16 || delimiter.contains(|c: char| c.is_whitespace() || c == ')' || c == '\\') {
        return false;
    }
    let closing = format!("){delimiter}\"");
    match rest[open + 1..].find(&closing) {
        Some(pos) => {
            lex.bump(open + 1 + pos + closing.len());
            true
        },
        None => false,
    }
}

impl From<LexToken> for LexicalKind {
    fn from(token: LexToken) -> Self {
        match token {
            LexToken::Whitespace => LexicalKind::Whitespace,
            LexToken::Comment => LexicalKind::Comment,
            LexToken::Identifier => LexicalKind::RawIdentifier,
            LexToken::Number => LexicalKind::NumericConstant,
            LexToken::String | LexToken::RawString => LexicalKind::StringLiteral,
            LexToken::Char => LexicalKind::CharConstant,
            LexToken::Punctuator => LexicalKind::Punctuator,
        }
    }
}

/// Iterator over the non-whitespace tokens of a source text.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LexToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LexToken::lexer(input),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token_result = self.inner.next()?;
            let span = self.inner.span();
            let kind = match token_result {
                Ok(LexToken::Whitespace) => continue,
                Ok(token) => token.into(),
                Err(()) => LexicalKind::Unknown,
            };
            return Some(RawToken::new(span.start, span.len(), kind));
        }
    }
}

/// Lex `source` into its ordered token stream.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    Lexer::new(source).collect()
}

#[cfg(test)]
#[path = "../../tests/src/frontend/lexer_tests.rs"]
mod tests;
