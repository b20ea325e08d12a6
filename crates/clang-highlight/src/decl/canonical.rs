use super::{DeclId, DeclTable};

/// Map a declaration to the one the author actually wrote.
///
/// Instantiated members resolve to the member of the class template they
/// were instantiated from, function template specializations resolve to the
/// templated declaration of their (member) template, and templates resolve
/// to their templated declaration. Steps repeat until a fixed point, so the
/// result is always canonical itself; the step count is bounded by the table
/// size so a malformed, cyclic table still terminates.
pub fn canonicalize(
    table: &DeclTable,
    id: DeclId,
) -> DeclId {
    let mut current = id;
    for _ in 0..=table.len() {
        match step(table, current) {
            Some(next) if next != current => current = next,
            _ => break,
        }
    }
    current
}

fn step(
    table: &DeclTable,
    id: DeclId,
) -> Option<DeclId> {
    let decl = table.get(id)?;

    if decl.kind.is_callable() {
        if let Some(member) = decl.origin.instantiated_from_member {
            return Some(member);
        }
        let primary = decl.origin.primary_template?;
        return Some(templated_decl_of(table, primary));
    }

    if decl.kind.is_template() {
        return Some(templated_decl_of(table, id));
    }

    None
}

/// The templated declaration of `template`, looking through the member
/// template it was instantiated from.
fn templated_decl_of(
    table: &DeclTable,
    template: DeclId,
) -> DeclId {
    let authored = table
        .get(template)
        .and_then(|decl| decl.origin.instantiated_from_member_template)
        .unwrap_or(template);
    table.get(authored).and_then(|decl| decl.origin.templated_decl).unwrap_or(authored)
}

#[cfg(test)]
#[path = "../../tests/src/decl/canonical_tests.rs"]
mod tests;
