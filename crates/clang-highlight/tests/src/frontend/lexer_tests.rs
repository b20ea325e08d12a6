use super::*;

fn lex(input: &str) -> Vec<(LexicalKind, &str)> {
    Lexer::new(input).map(|token| (token.kind, &input[token.offset..token.end()])).collect()
}

#[test]
fn test_declaration() {
    assert_eq!(
        lex("int x = 1;\n"),
        vec![
            (LexicalKind::RawIdentifier, "int"),
            (LexicalKind::RawIdentifier, "x"),
            (LexicalKind::Punctuator, "="),
            (LexicalKind::NumericConstant, "1"),
            (LexicalKind::Punctuator, ";"),
        ]
    );
}

#[test]
fn test_offsets() {
    let offsets: Vec<_> = tokenize("int x = 1;\n").iter().map(|t| (t.offset, t.length)).collect();
    assert_eq!(offsets, vec![(0, 3), (4, 1), (6, 1), (8, 1), (9, 1)]);
}

#[test]
fn test_comments_are_kept() {
    assert_eq!(
        lex("a // line\n/* block\n */ b"),
        vec![
            (LexicalKind::RawIdentifier, "a"),
            (LexicalKind::Comment, "// line"),
            (LexicalKind::Comment, "/* block\n */"),
            (LexicalKind::RawIdentifier, "b"),
        ]
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        lex(r#"0x1Fu 1'000 3.5e-2f "a\"b" u8"s" 'c' L'\n'"#),
        vec![
            (LexicalKind::NumericConstant, "0x1Fu"),
            (LexicalKind::NumericConstant, "1'000"),
            (LexicalKind::NumericConstant, "3.5e-2f"),
            (LexicalKind::StringLiteral, r#""a\"b""#),
            (LexicalKind::StringLiteral, r#"u8"s""#),
            (LexicalKind::CharConstant, "'c'"),
            (LexicalKind::CharConstant, r"L'\n'"),
        ]
    );
}

#[test]
fn test_raw_string() {
    assert_eq!(
        lex(r#"R"x(a)" b)x" c"#),
        vec![(LexicalKind::StringLiteral, r#"R"x(a)" b)x""#), (LexicalKind::RawIdentifier, "c"),]
    );
}

#[test]
fn test_longest_punctuators() {
    assert_eq!(
        lex("a<=>b::c->*d...<<="),
        vec![
            (LexicalKind::RawIdentifier, "a"),
            (LexicalKind::Punctuator, "<=>"),
            (LexicalKind::RawIdentifier, "b"),
            (LexicalKind::Punctuator, "::"),
            (LexicalKind::RawIdentifier, "c"),
            (LexicalKind::Punctuator, "->*"),
            (LexicalKind::RawIdentifier, "d"),
            (LexicalKind::Punctuator, "..."),
            (LexicalKind::Punctuator, "<<="),
        ]
    );
}

#[test]
fn test_include_directive() {
    assert_eq!(
        lex("#include <foo.h>"),
        vec![
            (LexicalKind::Punctuator, "#"),
            (LexicalKind::RawIdentifier, "include"),
            (LexicalKind::Punctuator, "<"),
            (LexicalKind::RawIdentifier, "foo"),
            (LexicalKind::Punctuator, "."),
            (LexicalKind::RawIdentifier, "h"),
            (LexicalKind::Punctuator, ">"),
        ]
    );
}

#[test]
fn test_unknown() {
    assert_eq!(
        lex("a @ b"),
        vec![(LexicalKind::RawIdentifier, "a"), (LexicalKind::Unknown, "@"), (LexicalKind::RawIdentifier, "b"),]
    );
}
