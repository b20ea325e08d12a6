//! Reference front end: lexes the input, obtains a Clang JSON AST dump and
//! turns both into the [`Facts`] the engine consumes.

pub mod ast_walk;
pub mod clang_nodes;
pub mod compiler;
pub mod directives;
pub mod lexer;
pub mod type_names;

use std::{io, path::Path, sync::Arc};

use tracing::debug;

use self::{ast_walk::walk_ast, clang_nodes::Node, directives::scan_inclusions, lexer::tokenize};
use crate::{
    config::RunConfig,
    error::HighlightError,
    pipeline::Facts,
    preprocess::{InclusionDirective, PreprocessingEntity},
};

/// Read the input, dump (or load) its AST and collect every fact.
pub fn collect_facts(config: &RunConfig) -> Result<Facts, HighlightError> {
    let source = read_source(&config.input)?;
    let ast_json = match &config.ast_json {
        Some(path) => std::fs::read_to_string(path).map_err(|source| HighlightError::io(path, source))?,
        None => compiler::run_ast_dump(&config.frontend.compiler, &config.compiler_flags(), &config.input)?,
    };
    facts_from_ast(source, &config.input.display().to_string(), &ast_json)
}

fn read_source(path: &Path) -> Result<String, HighlightError> {
    let bytes = std::fs::read(path).map_err(|source| HighlightError::io(path, source))?;
    String::from_utf8(bytes).map_err(|_| {
        HighlightError::io(path, io::Error::new(io::ErrorKind::InvalidData, "source is not valid UTF-8"))
    })
}

/// Build the facts for `source`, whose AST dump is `ast_json`.
/// `primary_file` is the path the dump uses for the source.
pub fn facts_from_ast(
    source: String,
    primary_file: &str,
    ast_json: &str,
) -> Result<Facts, HighlightError> {
    let root: Node = serde_json::from_str(ast_json)?;
    let tokens = tokenize(&source);
    let file: Arc<str> = Arc::from(primary_file);
    let mut inclusions = scan_inclusions(&source, &tokens, &file);
    let ast = walk_ast(&root, primary_file, &source, &tokens);

    for inclusion in &mut inclusions {
        inclusion.included = resolve_header(inclusion, &ast.included_headers);
    }
    debug!(
        "[frontend] {} tokens, {} inclusions ({} resolved), {} macro expansions",
        tokens.len(),
        inclusions.len(),
        inclusions.iter().filter(|inclusion| inclusion.included.is_some()).count(),
        ast.macro_expansions.len()
    );

    let mut preprocessing: Vec<PreprocessingEntity> = inclusions
        .into_iter()
        .map(PreprocessingEntity::Inclusion)
        .chain(ast.macro_expansions.into_iter().map(PreprocessingEntity::MacroExpansion))
        .collect();
    preprocessing.sort_by_key(PreprocessingEntity::start);

    Ok(Facts {
        source: Arc::from(source.into_bytes()),
        primary_file: primary_file.to_string(),
        tokens,
        preprocessing,
        decls: ast.decls,
        events: ast.events,
    })
}

/// The included file whose path ends with the header name as written.
fn resolve_header<'h>(
    inclusion: &InclusionDirective,
    headers: impl IntoIterator<Item = &'h String>,
) -> Option<String> {
    let suffix = format!("/{}", inclusion.spelled);
    headers.into_iter().find(|header| **header == inclusion.spelled || header.ends_with(&suffix)).cloned()
}
