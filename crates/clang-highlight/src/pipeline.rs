//! Drives one file through the passes: lexical population, preprocessing
//! collapse, semantic merge, then rendering.

use std::{io::Write, sync::Arc};

use tracing::debug;

use crate::{
    config::{OutputTarget, RunConfig},
    decl::DeclTable,
    error::HighlightError,
    index::TokenMap,
    merge::{MatchEvent, MergeContext, merge_events},
    preprocess::{PreprocessingEntity, collapse_preprocessing},
    render::{render_html, render_json},
    token::RawToken,
};

/// Everything the front end learned about one file.
#[derive(Debug, Clone)]
pub struct Facts {
    pub source: Arc<[u8]>,
    /// Path of the annotated file, spelled the way locations spell it.
    pub primary_file: String,
    /// Lexical tokens of `source`, ordered and non-overlapping.
    pub tokens: Vec<RawToken>,
    pub preprocessing: Vec<PreprocessingEntity>,
    pub decls: DeclTable,
    /// Semantic events in AST traversal order.
    pub events: Vec<MatchEvent>,
}

/// Build the fully merged index for `facts`.
///
/// The coverage invariant is checked after every pass; any failure aborts
/// the run so nothing is rendered from a half-merged index.
pub fn annotate(
    facts: &Facts,
    config: &RunConfig,
) -> Result<TokenMap, HighlightError> {
    let mut tokens = TokenMap::populate(&facts.source, &facts.tokens)?;
    tokens.check_coverage()?;
    debug!("[annotate] {} lexical records over {} bytes of {}", tokens.len(), facts.source.len(), facts.primary_file);

    collapse_preprocessing(&mut tokens, &facts.primary_file, &facts.preprocessing);
    tokens.check_coverage()?;

    let ctx = MergeContext::new(&facts.primary_file, &facts.decls).with_same_file_links(config.same_file_links);
    merge_events(&mut tokens, &ctx, &facts.events)?;
    tokens.check_coverage()?;

    debug!("[annotate] {} records after merge", tokens.len());
    Ok(tokens)
}

/// Render `tokens` to every output the run asked for.
pub fn write_outputs(
    facts: &Facts,
    tokens: &TokenMap,
    config: &RunConfig,
) -> Result<(), HighlightError> {
    if let Some(target) = &config.html_out {
        write_to(target, |mut out| render_html(&facts.source, tokens, &config.html, &mut out))?;
    }
    if let Some(target) = &config.json_out {
        write_to(target, |mut out| render_json(&facts.primary_file, tokens, config.punctuation, &mut out))?;
    }
    Ok(())
}

fn write_to(
    target: &OutputTarget,
    render: impl FnOnce(&mut dyn Write) -> std::io::Result<()>,
) -> Result<(), HighlightError> {
    let mut out = target.open()?;
    render(out.as_mut())
        .and_then(|()| out.flush())
        .map_err(|source| HighlightError::io(target.describe(), source))?;
    debug!("[output] wrote {}", target.describe().display());
    Ok(())
}
