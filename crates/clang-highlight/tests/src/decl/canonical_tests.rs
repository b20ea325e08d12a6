use super::*;
use crate::{
    decl::{DeclKind, Declaration},
    location::DeclLocation,
};

fn decl(
    kind: DeclKind,
    name: &str,
) -> Declaration {
    Declaration::new(kind, name, name).at(DeclLocation::new("a.h", 1, 1))
}

#[test]
fn plain_declarations_are_canonical() {
    let mut table = DeclTable::new();
    let var = table.insert(decl(DeclKind::Variable, "x"));
    let func = table.insert(decl(DeclKind::Function, "f"));
    assert_eq!(canonicalize(&table, var), var);
    assert_eq!(canonicalize(&table, func), func);
}

#[test]
fn instantiated_member_resolves_to_authored_member() {
    let mut table = DeclTable::new();
    let authored = table.insert(decl(DeclKind::Method, "foo"));
    let mut instantiated = decl(DeclKind::Method, "foo");
    instantiated.origin.instantiated_from_member = Some(authored);
    let instantiated = table.insert(instantiated);

    assert_eq!(canonicalize(&table, instantiated), authored);
}

#[test]
fn function_template_specialization_resolves_to_templated_decl() {
    let mut table = DeclTable::new();
    let pattern = table.insert(decl(DeclKind::Function, "max"));
    let mut template = decl(DeclKind::FunctionTemplate, "max");
    template.origin.templated_decl = Some(pattern);
    let template = table.insert(template);
    let mut specialization = decl(DeclKind::Function, "max");
    specialization.origin.primary_template = Some(template);
    let specialization = table.insert(specialization);

    assert_eq!(canonicalize(&table, specialization), pattern);
    assert_eq!(canonicalize(&table, template), pattern);
}

#[test]
fn member_template_specialization_looks_through_instantiation() {
    let mut table = DeclTable::new();
    let authored_pattern = table.insert(decl(DeclKind::Method, "get"));
    let mut authored_template = decl(DeclKind::FunctionTemplate, "get");
    authored_template.origin.templated_decl = Some(authored_pattern);
    let authored_template = table.insert(authored_template);

    let instantiated_pattern = table.insert(decl(DeclKind::Method, "get"));
    let mut instantiated_template = decl(DeclKind::FunctionTemplate, "get");
    instantiated_template.origin.templated_decl = Some(instantiated_pattern);
    instantiated_template.origin.instantiated_from_member_template = Some(authored_template);
    let instantiated_template = table.insert(instantiated_template);

    let mut specialization = decl(DeclKind::Method, "get");
    specialization.origin.primary_template = Some(instantiated_template);
    let specialization = table.insert(specialization);

    assert_eq!(canonicalize(&table, specialization), authored_pattern);
}

#[test]
fn canonicalize_is_idempotent() {
    let mut table = DeclTable::new();
    let authored = table.insert(decl(DeclKind::Method, "foo"));
    let mut instantiated = decl(DeclKind::Method, "foo");
    instantiated.origin.instantiated_from_member = Some(authored);
    let instantiated = table.insert(instantiated);

    for (id, _) in table.iter() {
        let once = canonicalize(&table, id);
        assert_eq!(canonicalize(&table, once), once);
    }
    assert_eq!(canonicalize(&table, canonicalize(&table, instantiated)), authored);
}

#[test]
fn cyclic_origins_terminate() {
    let mut table = DeclTable::new();
    let a = table.insert(decl(DeclKind::Method, "a"));
    let b = table.insert(decl(DeclKind::Method, "b"));
    table.get_mut(a).unwrap().origin.instantiated_from_member = Some(b);
    table.get_mut(b).unwrap().origin.instantiated_from_member = Some(a);

    let resolved = canonicalize(&table, a);
    assert!(resolved == a || resolved == b);
}

#[test]
fn unknown_ids_are_returned_unchanged() {
    let table = DeclTable::new();
    assert_eq!(canonicalize(&table, DeclId(7)), DeclId(7));
}
