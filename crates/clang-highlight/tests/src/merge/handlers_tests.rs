use super::*;
use crate::{
    decl::{DeclId, DeclKind, DeclTable, Declaration},
    location::DeclLocation,
    merge::{MatchEvent, NamedType, VarDeclEvent, merge_events},
    token::{LexicalKind, RawToken},
};

const PRIMARY: &str = "main.cpp";

/// `int x = 1;\n`
fn tokens() -> TokenMap {
    let source = b"int x = 1;\n";
    let raw = [
        RawToken::new(0, 3, LexicalKind::RawIdentifier),
        RawToken::new(4, 1, LexicalKind::RawIdentifier),
        RawToken::new(6, 1, LexicalKind::Punctuator),
        RawToken::new(8, 1, LexicalKind::NumericConstant),
        RawToken::new(9, 1, LexicalKind::Punctuator),
    ];
    TokenMap::populate(source, &raw).unwrap()
}

fn table() -> (DeclTable, DeclId, DeclId, DeclId) {
    let mut decls = DeclTable::new();
    let local = decls.insert(Declaration::new(DeclKind::Variable, "x", "x").at(DeclLocation::new(PRIMARY, 1, 5)));
    let header =
        decls.insert(Declaration::new(DeclKind::Variable, "g", "ns::g").at(DeclLocation::new("lib.h", 3, 12)));
    let record = decls.insert(Declaration::new(DeclKind::Record, "S", "ns::S").at(DeclLocation::new("lib.h", 7, 8)));
    (decls, local, header, record)
}

fn at(offset: usize) -> EventLocation {
    EventLocation::plain(PRIMARY, offset)
}

#[test]
fn var_decl_reclassifies_the_name() {
    let mut map = tokens();
    let (decls, ..) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [MatchEvent::VarDecl(VarDeclEvent {
        location: at(4),
    })];

    let stats = merge_events(&mut map, &ctx, &events).unwrap();
    assert_eq!(map.get(4).unwrap().category, TokenCategory::Variable);
    assert!(map.get(4).unwrap().link.is_none());
    assert_eq!(stats.reclassified, 1);
}

#[test]
fn reference_to_header_variable_links() {
    let mut map = tokens();
    let (decls, _, header, _) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [MatchEvent::Reference(ReferenceEvent {
        location: at(4),
        target: header,
    })];

    merge_events(&mut map, &ctx, &events).unwrap();
    let record = map.get(4).unwrap();
    assert_eq!(record.category, TokenCategory::Variable);
    let link = record.link.as_ref().expect("linked");
    assert_eq!((link.file.as_str(), link.line, link.column), ("lib.h", 3, 12));
    assert_eq!(link.qualified_name, "ns::g");
}

#[test]
fn same_file_links_are_suppressed_unless_enabled() {
    let (decls, local, ..) = table();
    let events = [MatchEvent::Reference(ReferenceEvent {
        location: at(4),
        target: local,
    })];

    let mut map = tokens();
    merge_events(&mut map, &MergeContext::new(PRIMARY, &decls), &events).unwrap();
    assert_eq!(map.get(4).unwrap().category, TokenCategory::Variable);
    assert!(map.get(4).unwrap().link.is_none());

    let mut map = tokens();
    let ctx = MergeContext::new(PRIMARY, &decls).with_same_file_links(true);
    merge_events(&mut map, &ctx, &events).unwrap();
    assert_eq!(map.get(4).unwrap().link.as_ref().map(|l| l.file.as_str()), Some(PRIMARY));
}

#[test]
fn type_use_links_without_reclassifying() {
    let mut map = tokens();
    let (decls, _, _, record) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [
        MatchEvent::TypeUse(TypeUseEvent {
            location: at(0),
            named: NamedType::Record(record),
        }),
        MatchEvent::TypeUse(TypeUseEvent {
            location: at(4),
            named: NamedType::Unnamed,
        }),
    ];

    merge_events(&mut map, &ctx, &events).unwrap();
    let first = map.get(0).unwrap();
    assert_eq!(first.category, TokenCategory::Keyword);
    assert_eq!(first.link.as_ref().map(|l| l.name.as_str()), Some("S"));
    assert!(map.get(4).unwrap().link.is_none());
}

#[test]
fn member_access_links_without_reclassifying() {
    let mut map = tokens();
    let (decls, _, header, _) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [MatchEvent::MemberAccess(MemberAccessEvent {
        location: at(4),
        member: header,
    })];

    merge_events(&mut map, &ctx, &events).unwrap();
    let record = map.get(4).unwrap();
    assert_eq!(record.category, TokenCategory::Name);
    assert!(record.link.is_some());
}

#[test]
fn events_outside_the_primary_file_are_ignored() {
    let mut map = tokens();
    let before = map.clone();
    let (decls, _, header, _) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [MatchEvent::Reference(ReferenceEvent {
        location: EventLocation::plain("lib.h", 4),
        target: header,
    })];

    let stats = merge_events(&mut map, &ctx, &events).unwrap();
    assert_eq!(map, before);
    assert_eq!(stats.outside_primary, 1);
}

#[test]
fn spelled_location_wins_over_expansion() {
    let mut map = tokens();
    let (decls, ..) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let location = EventLocation {
        spelling: Some(crate::location::FileOffset::new(PRIMARY, 4)),
        expansion: Some(crate::location::FileOffset::new(PRIMARY, 0)),
    };
    let events = [MatchEvent::VarDecl(VarDeclEvent {
        location,
    })];

    merge_events(&mut map, &ctx, &events).unwrap();
    assert_eq!(map.get(4).unwrap().category, TokenCategory::Variable);
    assert_eq!(map.get(0).unwrap().category, TokenCategory::Keyword);
}

#[test]
fn interior_offset_splits_the_token() {
    let source = b"ns::value\n";
    let mut map = TokenMap::populate(source, &[RawToken::new(0, 9, LexicalKind::RawIdentifier)]).unwrap();
    let (decls, _, header, _) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [MatchEvent::Reference(ReferenceEvent {
        location: at(4),
        target: header,
    })];

    let stats = merge_events(&mut map, &ctx, &events).unwrap();
    assert_eq!(stats.splits, 1);
    assert_eq!(map.get(0).unwrap().length, 4);
    let second = map.get(4).unwrap();
    assert_eq!((second.length, second.category), (5, TokenCategory::Variable));
    map.check_coverage().unwrap();
}

#[test]
fn offset_in_a_gap_is_a_consistency_error() {
    let mut map = tokens();
    let (decls, ..) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [MatchEvent::VarDecl(VarDeclEvent {
        location: at(5),
    })];

    let err = merge_events(&mut map, &ctx, &events).unwrap_err();
    match err {
        HighlightError::Consistency {
            offset,
            event,
            ..
        } => {
            assert_eq!(offset, 5);
            assert_eq!(event, "variable declaration");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn consistency_errors_name_the_event_kind() {
    let (decls, _, header, record) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let cases = [
        (
            MatchEvent::Reference(ReferenceEvent {
                location: at(7),
                target: header,
            }),
            "declaration reference",
        ),
        (
            MatchEvent::TypeUse(TypeUseEvent {
                location: at(7),
                named: NamedType::Record(record),
            }),
            "type use",
        ),
        (
            MatchEvent::MemberAccess(MemberAccessEvent {
                location: at(7),
                member: header,
            }),
            "member access",
        ),
    ];

    for (event, kind) in cases {
        assert_eq!(event.kind_name(), kind);
        assert_eq!(event.location(), &at(7));
        let err = merge_events(&mut tokens(), &ctx, [&event]).unwrap_err();
        assert!(matches!(err, HighlightError::Consistency { offset: 7, event, .. } if event == kind));
    }

    let unnamed = MatchEvent::TypeUse(TypeUseEvent {
        location: at(7),
        named: NamedType::Unnamed,
    });
    let stats = merge_events(&mut tokens(), &ctx, [&unnamed]).unwrap();
    assert_eq!(stats.events, 1);
}

#[test]
fn later_events_overwrite_earlier_links() {
    let mut map = tokens();
    let (decls, _, header, record) = table();
    let ctx = MergeContext::new(PRIMARY, &decls);
    let events = [
        MatchEvent::MemberAccess(MemberAccessEvent {
            location: at(4),
            member: header,
        }),
        MatchEvent::TypeUse(TypeUseEvent {
            location: at(4),
            named: NamedType::Record(record),
        }),
    ];

    merge_events(&mut map, &ctx, &events).unwrap();
    assert_eq!(map.get(4).unwrap().link.as_ref().map(|l| l.name.as_str()), Some("S"));
}
