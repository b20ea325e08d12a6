use std::io::Write;

use serde::Serialize;

use super::PunctuationMode;
use crate::{
    index::{SemanticLink, TokenMap, TokenRecord},
    token::TokenCategory,
};

/// Structured rendering of one annotated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredDocument<'a> {
    pub file: &'a str,
    pub tokens: Vec<StructuredToken<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredToken<'a> {
    pub offset: usize,
    pub length: usize,
    #[serde(rename = "type")]
    pub category: TokenCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<StructuredLink<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredLink<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
    pub name: &'a str,
    pub qualified_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_types: Option<&'a [String]>,
}

impl<'a> From<&'a SemanticLink> for StructuredLink<'a> {
    fn from(link: &'a SemanticLink) -> Self {
        Self {
            file: &link.file,
            line: link.line,
            column: link.column,
            name: &link.name,
            qualified_name: &link.qualified_name,
            parameter_types: link.parameter_types.as_deref(),
        }
    }
}

impl<'a> From<&'a TokenRecord> for StructuredToken<'a> {
    fn from(record: &'a TokenRecord) -> Self {
        Self {
            offset: record.start,
            length: record.length,
            category: record.category,
            link: record.link.as_ref().map(StructuredLink::from),
        }
    }
}

/// The ordered record list for `file`, filtered by `punctuation`.
pub fn structured_document<'a>(
    file: &'a str,
    tokens: &'a TokenMap,
    punctuation: PunctuationMode,
) -> StructuredDocument<'a> {
    StructuredDocument {
        file,
        tokens: tokens.iter().filter(|record| punctuation.keeps(record)).map(StructuredToken::from).collect(),
    }
}

/// Write the structured document as pretty-printed JSON followed by a
/// newline.
pub fn render_json<W: Write>(
    file: &str,
    tokens: &TokenMap,
    punctuation: PunctuationMode,
    out: &mut W,
) -> std::io::Result<()> {
    let document = structured_document(file, tokens, punctuation);
    serde_json::to_writer_pretty(&mut *out, &document)?;
    out.write_all(b"\n")
}

#[cfg(test)]
#[path = "../../tests/src/render/json_tests.rs"]
mod tests;
