//! Renderers over a finished [`TokenMap`](crate::index::TokenMap).

mod html;
mod json;

use clap::ValueEnum;
use serde::Deserialize;

use crate::{index::TokenRecord, token::TokenCategory};

pub use self::html::{escape_html, render_html};
pub use self::json::{StructuredDocument, StructuredLink, StructuredToken, render_json, structured_document};

/// Which punctuation records the structured renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunctuationMode {
    /// Every punctuation record.
    #[default]
    Keep,
    /// Only punctuation records that carry a link.
    Linked,
    /// No punctuation records.
    Skip,
}

impl PunctuationMode {
    /// Whether `record` survives the filter. Non-punctuation records always do.
    pub fn keeps(
        self,
        record: &TokenRecord,
    ) -> bool {
        if record.category != TokenCategory::Punctuation {
            return true;
        }
        match self {
            PunctuationMode::Keep => true,
            PunctuationMode::Linked => record.link.is_some(),
            PunctuationMode::Skip => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlStyle {
    /// A complete `<!doctype html>` document.
    #[default]
    Document,
    /// Only the `<pre>` block, for embedding into another page.
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    pub style: HtmlStyle,
    /// Stylesheet URLs linked from the document head.
    pub stylesheets: Vec<String>,
}

pub const DEFAULT_STYLESHEETS: &[&str] = &[
    "https://fonts.googleapis.com/css?family=Source+Sans+Pro:400,400i,600,600i%7CSource+Code+Pro:400,400i,600&subset=latin-ext",
    "https://static.magnum.graphics/m-dark.compiled.css",
    "https://static.magnum.graphics/m-dark.documentation.compiled.css",
];

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            style: HtmlStyle::Document,
            stylesheets: DEFAULT_STYLESHEETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
