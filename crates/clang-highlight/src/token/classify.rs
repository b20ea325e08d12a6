use super::{LexicalKind, TokenCategory};

/// Map a raw lexical token to its display category.
///
/// Raw identifiers are looked up in the C++ keyword table; punctuators are
/// split into operators and structural punctuation by spelling.
pub fn classify(
    kind: LexicalKind,
    text: &[u8],
) -> TokenCategory {
    match kind {
        LexicalKind::Whitespace => TokenCategory::Whitespace,
        LexicalKind::Comment => TokenCategory::Comment,
        LexicalKind::NumericConstant => TokenCategory::NumberLiteral,
        LexicalKind::StringLiteral => TokenCategory::StringLiteral,
        LexicalKind::CharConstant => TokenCategory::OtherLiteral,
        LexicalKind::RawIdentifier => {
            if is_keyword(text) {
                TokenCategory::Keyword
            } else {
                TokenCategory::Name
            }
        },
        LexicalKind::Punctuator => {
            if is_operator(text) {
                TokenCategory::Operator
            } else {
                TokenCategory::Punctuation
            }
        },
        LexicalKind::Unknown => TokenCategory::Other,
    }
}

pub fn is_keyword(text: &[u8]) -> bool {
    matches!(
        text,
        b"alignas"
            | b"alignof"
            | b"and"
            | b"and_eq"
            | b"asm"
            | b"auto"
            | b"bitand"
            | b"bitor"
            | b"bool"
            | b"break"
            | b"case"
            | b"catch"
            | b"char"
            | b"char8_t"
            | b"char16_t"
            | b"char32_t"
            | b"class"
            | b"compl"
            | b"concept"
            | b"const"
            | b"const_cast"
            | b"consteval"
            | b"constexpr"
            | b"constinit"
            | b"continue"
            | b"co_await"
            | b"co_return"
            | b"co_yield"
            | b"decltype"
            | b"default"
            | b"delete"
            | b"do"
            | b"double"
            | b"dynamic_cast"
            | b"else"
            | b"enum"
            | b"explicit"
            | b"export"
            | b"extern"
            | b"false"
            | b"float"
            | b"for"
            | b"friend"
            | b"goto"
            | b"if"
            | b"inline"
            | b"int"
            | b"long"
            | b"mutable"
            | b"namespace"
            | b"new"
            | b"noexcept"
            | b"not"
            | b"not_eq"
            | b"nullptr"
            | b"operator"
            | b"or"
            | b"or_eq"
            | b"private"
            | b"protected"
            | b"public"
            | b"register"
            | b"reinterpret_cast"
            | b"requires"
            | b"return"
            | b"short"
            | b"signed"
            | b"sizeof"
            | b"static"
            | b"static_assert"
            | b"static_cast"
            | b"struct"
            | b"switch"
            | b"template"
            | b"this"
            | b"thread_local"
            | b"throw"
            | b"true"
            | b"try"
            | b"typedef"
            | b"typeid"
            | b"typename"
            | b"union"
            | b"unsigned"
            | b"using"
            | b"virtual"
            | b"void"
            | b"volatile"
            | b"wchar_t"
            | b"while"
            | b"xor"
            | b"xor_eq"
    )
}

/// Punctuators that denote an operation rather than structure.
///
/// Brackets, `;`, `,`, `:`, `::`, `.`, `...` and the preprocessor `#`/`##`
/// stay punctuation.
pub fn is_operator(text: &[u8]) -> bool {
    matches!(
        text,
        b"+" | b"-"
            | b"*"
            | b"/"
            | b"%"
            | b"^"
            | b"&"
            | b"|"
            | b"~"
            | b"!"
            | b"="
            | b"<"
            | b">"
            | b"?"
            | b"++"
            | b"--"
            | b"+="
            | b"-="
            | b"*="
            | b"/="
            | b"%="
            | b"^="
            | b"&="
            | b"|="
            | b"=="
            | b"!="
            | b"<="
            | b">="
            | b"<=>"
            | b"&&"
            | b"||"
            | b"<<"
            | b">>"
            | b"<<="
            | b">>="
            | b"->"
            | b"->*"
            | b".*"
    )
}

#[cfg(test)]
#[path = "../../tests/src/token/classify_tests.rs"]
mod tests;
