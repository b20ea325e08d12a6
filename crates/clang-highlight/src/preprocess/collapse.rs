use tracing::{debug, warn};

use super::{InclusionDirective, MacroExpansion, PreprocessingEntity};
use crate::{
    index::{SemanticLink, TokenMap, TokenRecord},
    location::DeclLocation,
    token::TokenCategory,
};

/// Name used for links that point at a whole file rather than a symbol.
pub const FILE_LINK_NAME: &str = "<file>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseStats {
    pub inclusions: usize,
    pub collapsed_records: usize,
    pub macro_expansions: usize,
    pub skipped: usize,
}

/// Fold the primary file's preprocessing entities into `tokens`.
///
/// Inclusion directives become one Preprocessor record each; macro
/// expansion sites get their first token reclassified and, when the macro
/// is defined in another file, linked to the definition. Entities whose
/// start is not a record start are skipped with a warning.
pub fn collapse_preprocessing(
    tokens: &mut TokenMap,
    primary_file: &str,
    entities: &[PreprocessingEntity],
) -> CollapseStats {
    let mut stats = CollapseStats::default();

    for entity in entities {
        if entity.file() != primary_file {
            continue;
        }
        if tokens.get(entity.start()).is_none() {
            warn!("Could not find token for preprocessing entity at offset {}", entity.start());
            stats.skipped += 1;
            continue;
        }
        match entity {
            PreprocessingEntity::Inclusion(directive) => collapse_inclusion(tokens, directive, &mut stats),
            PreprocessingEntity::MacroExpansion(expansion) => {
                mark_macro_expansion(tokens, primary_file, expansion, &mut stats)
            },
        }
    }

    debug!(
        "[collapse] {} inclusions ({} records folded), {} macro expansions, {} skipped",
        stats.inclusions, stats.collapsed_records, stats.macro_expansions, stats.skipped
    );
    stats
}

fn collapse_inclusion(
    tokens: &mut TokenMap,
    directive: &InclusionDirective,
    stats: &mut CollapseStats,
) {
    let link = directive
        .included
        .as_ref()
        .map(|path| SemanticLink::new(FILE_LINK_NAME, &directive.spelled, &DeclLocation::new(path.as_str(), 1, 1)));
    let replacement = TokenRecord::new(
        directive.start,
        directive.end.saturating_sub(directive.start),
        TokenCategory::Preprocessor,
    )
    .with_link(link);

    match tokens.replace_range(directive.start, directive.end, replacement) {
        Ok(removed) => {
            stats.inclusions += 1;
            stats.collapsed_records += removed;
        },
        Err(error) => {
            warn!("Skipping inclusion directive [{}, {}): {error}", directive.start, directive.end);
            stats.skipped += 1;
        },
    }
}

fn mark_macro_expansion(
    tokens: &mut TokenMap,
    primary_file: &str,
    expansion: &MacroExpansion,
    stats: &mut CollapseStats,
) {
    let Some(record) = tokens.get_mut(expansion.offset) else {
        return;
    };
    record.category = TokenCategory::Preprocessor;
    if let Some(definition) = expansion.definition.as_ref()
        && &*definition.file != primary_file
    {
        record.link = Some(SemanticLink::new(&expansion.name, &expansion.name, definition));
    }
    stats.macro_expansions += 1;
}

#[cfg(test)]
#[path = "../../tests/src/preprocess/collapse_tests.rs"]
mod tests;
