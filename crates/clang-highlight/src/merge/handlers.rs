use super::{MemberAccessEvent, MergeContext, MergeStats, ReferenceEvent, TypeUseEvent};
use crate::{
    error::HighlightError,
    index::{TokenMap, TokenRecord},
    location::EventLocation,
    token::TokenCategory,
};

pub(super) fn on_reference(
    record: &mut TokenRecord,
    ctx: &MergeContext<'_>,
    event: &ReferenceEvent,
    stats: &mut MergeStats,
) {
    if ctx.decls.get(event.target).is_some_and(|decl| decl.kind.is_variable()) {
        record.category = TokenCategory::Variable;
        stats.reclassified += 1;
    }
    if let Some(link) = ctx.link_to(event.target) {
        record.link = Some(link);
        stats.linked += 1;
    }
}

pub(super) fn on_var_decl(
    record: &mut TokenRecord,
    stats: &mut MergeStats,
) {
    record.category = TokenCategory::Variable;
    stats.reclassified += 1;
}

pub(super) fn on_type_use(
    record: &mut TokenRecord,
    ctx: &MergeContext<'_>,
    event: &TypeUseEvent,
    stats: &mut MergeStats,
) {
    if let Some(link) = event.named.declaration().and_then(|target| ctx.link_to(target)) {
        record.link = Some(link);
        stats.linked += 1;
    }
}

pub(super) fn on_member_access(
    record: &mut TokenRecord,
    ctx: &MergeContext<'_>,
    event: &MemberAccessEvent,
    stats: &mut MergeStats,
) {
    if let Some(link) = ctx.link_to(event.member) {
        record.link = Some(link);
        stats.linked += 1;
    }
}

/// Resolve the spelled location to the record starting there.
///
/// `Ok(None)` means the event is outside the primary file and must be
/// ignored; an offset inside the primary file that no record covers is a
/// consistency failure.
pub(super) fn locate<'m>(
    tokens: &'m mut TokenMap,
    ctx: &MergeContext<'_>,
    location: &EventLocation,
    event: &'static str,
    stats: &mut MergeStats,
) -> Result<Option<&'m mut TokenRecord>, HighlightError> {
    let Some(offset) = location.offset_in(ctx.primary_file) else {
        stats.outside_primary += 1;
        return Ok(None);
    };
    match tokens.containing(offset) {
        None => {
            return Err(HighlightError::Consistency {
                offset,
                event,
                context: tokens.describe_around(offset),
            });
        },
        Some(record) if record.start != offset => stats.splits += 1,
        Some(_) => {},
    }
    Ok(Some(tokens.get_or_split(offset)?))
}

#[cfg(test)]
#[path = "../../tests/src/merge/handlers_tests.rs"]
mod tests;
