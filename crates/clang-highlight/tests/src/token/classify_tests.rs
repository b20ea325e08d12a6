use super::*;

#[test]
fn identifiers_split_into_keywords_and_names() {
    assert_eq!(classify(LexicalKind::RawIdentifier, b"int"), TokenCategory::Keyword);
    assert_eq!(classify(LexicalKind::RawIdentifier, b"constexpr"), TokenCategory::Keyword);
    assert_eq!(classify(LexicalKind::RawIdentifier, b"and"), TokenCategory::Keyword);
    assert_eq!(classify(LexicalKind::RawIdentifier, b"x"), TokenCategory::Name);
    assert_eq!(classify(LexicalKind::RawIdentifier, b"Integer"), TokenCategory::Name);
}

#[test]
fn punctuators_split_into_operators_and_punctuation() {
    for op in [&b"="[..], b"+=", b"<=>", b"->", b"&&", b"?"] {
        assert_eq!(classify(LexicalKind::Punctuator, op), TokenCategory::Operator, "{op:?}");
    }
    for punct in [&b";"[..], b",", b"(", b"}", b"::", b"...", b"#"] {
        assert_eq!(classify(LexicalKind::Punctuator, punct), TokenCategory::Punctuation, "{punct:?}");
    }
}

#[test]
fn literals_and_comments() {
    assert_eq!(classify(LexicalKind::NumericConstant, b"0x1f"), TokenCategory::NumberLiteral);
    assert_eq!(classify(LexicalKind::StringLiteral, b"\"hi\""), TokenCategory::StringLiteral);
    assert_eq!(classify(LexicalKind::CharConstant, b"'a'"), TokenCategory::OtherLiteral);
    assert_eq!(classify(LexicalKind::Comment, b"// x"), TokenCategory::Comment);
    assert_eq!(classify(LexicalKind::Unknown, b"@"), TokenCategory::Other);
}

#[test]
fn category_names_match_structured_output() {
    let names: Vec<_> = TokenCategory::ALL.iter().map(|category| category.name()).collect();
    assert_eq!(
        names,
        vec![
            "whitespace",
            "keyword",
            "name",
            "string_literal",
            "number_literal",
            "other_literal",
            "operator",
            "punctuation",
            "comment",
            "preprocessor",
            "variable",
            "other",
        ]
    );
    for category in TokenCategory::ALL {
        let json = serde_json::to_string(&category).expect("category serializes");
        assert_eq!(json, format!("\"{}\"", category.name()));
    }
}
