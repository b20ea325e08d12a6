//! Named parts of Clang's spelled types and scope-aware lookup of the
//! declarations they name.

use std::collections::HashMap;

use crate::token::is_keyword;

/// One named part of a spelled type: `ns::Foo` in `const ns::Foo<int> &`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeName<'a> {
    /// The name as spelled, qualifier included.
    pub spelled: &'a str,
    /// Followed by a template argument list.
    pub specialized: bool,
}

impl<'a> TypeName<'a> {
    /// The unqualified identifier.
    pub fn identifier(&self) -> &'a str {
        self.spelled.rsplit("::").next().unwrap_or(self.spelled)
    }

    /// Qualifier components, outermost first.
    pub fn qualifier(&self) -> impl Iterator<Item = &'a str> {
        let mut parts: Vec<&'a str> = self.spelled.split("::").collect();
        parts.pop();
        parts.into_iter()
    }
}

/// Words Clang prints in types that are not C++ keywords.
const SPELLING_ONLY: &[&str] = &["restrict", "__restrict", "_Bool", "_Complex", "_Atomic"];

/// Every distinct named part of `spelled`, in spelling order: the outer type
/// first, then template arguments. Builtins, qualifiers and literals are
/// skipped, as are Clang's `(anonymous ...)`/`(unnamed ...)`/`(lambda ...)`
/// descriptions.
pub fn type_names(spelled: &str) -> Vec<TypeName<'_>> {
    let bytes = spelled.as_bytes();
    let mut names: Vec<TypeName<'_>> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'(' && is_synthesized_description(&spelled[i..]) {
            i = skip_parenthesized(bytes, i);
            continue;
        }
        if byte.is_ascii_digit() {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.') {
                i += 1;
            }
            continue;
        }
        if !(is_identifier_start(byte) || spelled[i..].starts_with("::")) {
            i += 1;
            continue;
        }

        let start = if spelled[i..].starts_with("::") { i + 2 } else { i };
        let mut end = start;
        loop {
            let ident_start = end;
            while end < bytes.len() && is_identifier_continue(bytes[end]) {
                end += 1;
            }
            if end == ident_start || !spelled[end..].starts_with("::") {
                break;
            }
            let after = end + 2;
            if !bytes.get(after).copied().is_some_and(is_identifier_start) {
                break;
            }
            end = after;
        }
        i = end.max(i + 1);

        let name = &spelled[start..end];
        if name.is_empty() || is_keyword(name.as_bytes()) || SPELLING_ONLY.contains(&name) {
            continue;
        }
        let specialized = spelled[end..].trim_start().starts_with('<');
        if !names.iter().any(|seen| seen.spelled == name) {
            names.push(TypeName {
                spelled: name,
                specialized,
            });
        }
    }
    names
}

/// The result part of a spelled function type: `Foo` in `Foo (int)`, `Bar`
/// in `auto () -> Bar`.
pub fn function_result(function_type: &str) -> String {
    let mut depth = 0usize;
    for (i, byte) in function_type.bytes().enumerate() {
        match byte {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b'(' if depth == 0 => {
                let result = function_type[..i].trim();
                return match function_type[i..].split_once(") -> ") {
                    Some((_, trailing)) => format!("{result} {trailing}"),
                    None => result.to_string(),
                };
            },
            _ => {},
        }
    }
    function_type.trim().to_string()
}

/// Declarations keyed by qualified name, looked up the way an unqualified
/// or partially qualified name is found from inside a scope.
#[derive(Debug)]
pub struct ScopedNames<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for ScopedNames<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> ScopedNames<T> {
    pub fn insert(
        &mut self,
        qualified_name: String,
        value: T,
    ) {
        self.entries.insert(qualified_name, value);
    }

    pub fn get(
        &self,
        qualified_name: &str,
    ) -> Option<&T> {
        self.entries.get(qualified_name)
    }

    /// Resolve `spelled` as written inside `scope`: enclosing scopes are tried
    /// innermost first, then any entry whose qualified name ends with
    /// `::spelled`, but only when exactly one does.
    pub fn resolve(
        &self,
        spelled: &str,
        scope: &[String],
    ) -> Option<&T> {
        for depth in (0..=scope.len()).rev() {
            let mut candidate = scope[..depth].join("::");
            if !candidate.is_empty() {
                candidate.push_str("::");
            }
            candidate.push_str(spelled);
            if let Some(value) = self.entries.get(&candidate) {
                return Some(value);
            }
        }

        let suffix = format!("::{spelled}");
        let mut matches = self.entries.iter().filter(|(name, _)| name.ends_with(&suffix));
        let (_, only) = matches.next()?;
        matches.next().is_none().then_some(only)
    }
}

fn is_synthesized_description(text: &str) -> bool {
    ["(anonymous", "(unnamed", "(lambda"].iter().any(|prefix| text.starts_with(prefix))
}

fn skip_parenthesized(
    bytes: &[u8],
    open: usize,
) -> usize {
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            },
            _ => {},
        }
    }
    bytes.len()
}

fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

#[cfg(test)]
#[path = "../../tests/src/frontend/type_names_tests.rs"]
mod tests;
