use super::*;

fn spelled(names: Vec<TypeName<'_>>) -> Vec<(&str, bool)> {
    names.into_iter().map(|name| (name.spelled, name.specialized)).collect()
}

#[test]
fn named_parts_in_spelling_order() {
    assert_eq!(spelled(type_names("const ns::Foo<int> &")), vec![("ns::Foo", true)]);
    assert_eq!(spelled(type_names("struct Bar *const")), vec![("Bar", false)]);
    assert_eq!(spelled(type_names("std::map<Key, ::outer::Value>")), vec![
        ("std::map", true),
        ("Key", false),
        ("outer::Value", false),
    ]);
    assert_eq!(spelled(type_names("Pair<Foo, Foo>")), vec![("Pair", true), ("Foo", false)]);
}

#[test]
fn builtins_literals_and_unnamed_types_are_skipped() {
    assert!(type_names("unsigned long long").is_empty());
    assert!(type_names("void (*)(int)").is_empty());
    assert!(type_names("int *__restrict").is_empty());
    assert_eq!(spelled(type_names("Array<float, 16>")), vec![("Array", true)]);
    assert!(type_names("struct (unnamed struct at main.cpp:1:1)").is_empty());
    assert!(type_names("(lambda at main.cpp:3:12)").is_empty());
}

#[test]
fn identifier_and_qualifier() {
    let name = type_names("a::b::Foo")[0];
    assert_eq!(name.identifier(), "Foo");
    assert_eq!(name.qualifier().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(type_names("Foo")[0].qualifier().count(), 0);
}

#[test]
fn function_results() {
    assert_eq!(function_result("Foo (int, Bar)"), "Foo");
    assert_eq!(function_result("const Pair<int, int> &(void)"), "const Pair<int, int> &");
    assert_eq!(function_result("auto () -> Bar"), "auto Bar");
    assert_eq!(function_result("void () const"), "void");
}

fn names() -> ScopedNames<u32> {
    let mut names = ScopedNames::default();
    for (value, name) in ["Foo", "a::Foo", "b::Foo", "a::inner::Bar", "c::Only"].into_iter().enumerate() {
        names.insert(name.to_string(), value as u32);
    }
    names
}

#[test]
fn resolve_prefers_the_innermost_scope() {
    let names = names();
    let scope = |parts: &[&str]| parts.iter().map(|part| part.to_string()).collect::<Vec<_>>();

    assert_eq!(names.resolve("Foo", &scope(&["a", "inner"])), Some(&1));
    assert_eq!(names.resolve("Foo", &scope(&["b"])), Some(&2));
    assert_eq!(names.resolve("Foo", &scope(&["c"])), Some(&0));
    assert_eq!(names.resolve("a::Foo", &scope(&["b"])), Some(&1));
    assert_eq!(names.resolve("Bar", &scope(&["a", "inner"])), Some(&3));
    assert_eq!(names.resolve("inner::Bar", &scope(&["a"])), Some(&3));
}

#[test]
fn resolve_falls_back_to_a_unique_suffix() {
    let names = names();
    assert_eq!(names.resolve("Only", &[]), Some(&4));
    assert_eq!(names.resolve("Bar", &[]), Some(&3));

    let mut ambiguous = ScopedNames::default();
    ambiguous.insert("a::Foo".to_string(), 1);
    ambiguous.insert("b::Foo".to_string(), 2);
    assert_eq!(ambiguous.resolve("Foo", &[]), None);
    assert_eq!(ambiguous.get("b::Foo"), Some(&2));
}
