//! Inclusion directives recovered from the raw token stream.

use std::sync::Arc;

use crate::{
    preprocess::InclusionDirective,
    token::{LexicalKind, RawToken},
};

const INCLUSION_KEYWORDS: &[&str] = &["include", "include_next", "import"];

/// Find every `#include`, `#include_next` and `#import` in `source`.
///
/// Each directive spans from `#` to the end of the header name, which is
/// either a string literal or a `<`…`>` sequence on the same line.
pub fn scan_inclusions(
    source: &str,
    tokens: &[RawToken],
    file: &Arc<str>,
) -> Vec<InclusionDirective> {
    let text = |token: &RawToken| &source[token.offset..token.end()];
    let mut directives = Vec::new();

    for (i, hash) in tokens.iter().enumerate() {
        if hash.kind != LexicalKind::Punctuator || text(hash) != "#" || !starts_line(source, hash.offset) {
            continue;
        }
        let Some(keyword) = tokens.get(i + 1) else {
            continue;
        };
        if keyword.kind != LexicalKind::RawIdentifier
            || !INCLUSION_KEYWORDS.contains(&text(keyword))
            || !same_line(source, hash.offset, keyword.offset)
        {
            continue;
        }
        let Some(name) = tokens.get(i + 2).filter(|name| same_line(source, hash.offset, name.offset)) else {
            continue;
        };

        let header = match (name.kind, text(name)) {
            (LexicalKind::StringLiteral, quoted) if quoted.len() >= 2 && quoted.starts_with('"') => {
                Some((name.end(), quoted[1..quoted.len() - 1].to_string()))
            },
            (LexicalKind::Punctuator, "<") => tokens[i + 3..]
                .iter()
                .take_while(|t| same_line(source, hash.offset, t.offset))
                .find(|t| t.kind == LexicalKind::Punctuator && text(t) == ">")
                .map(|close| (close.end(), source[name.end()..close.offset].to_string())),
            _ => None,
        };

        if let Some((end, spelled)) = header {
            directives.push(InclusionDirective {
                file: Arc::clone(file),
                start: hash.offset,
                end,
                spelled,
                included: None,
            });
        }
    }
    directives
}

fn starts_line(
    source: &str,
    offset: usize,
) -> bool {
    source[..offset].bytes().rev().take_while(|&b| b != b'\n').all(|b| b == b' ' || b == b'\t')
}

fn same_line(
    source: &str,
    from: usize,
    to: usize,
) -> bool {
    !source.as_bytes()[from..to].contains(&b'\n')
}

#[cfg(test)]
#[path = "../../tests/src/frontend/directives_tests.rs"]
mod tests;
