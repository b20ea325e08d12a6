use crate::{location::DeclLocation, token::TokenCategory};

/// Owned snapshot of a resolved declaration, attached to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticLink {
    pub name: String,
    pub qualified_name: String,
    /// Present only when the target is callable.
    pub parameter_types: Option<Vec<String>>,
    /// File declaring the target.
    pub file: String,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
}

impl SemanticLink {
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        location: &DeclLocation,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            parameter_types: None,
            file: location.file.to_string(),
            line: location.line,
            column: location.column,
        }
    }

    pub fn with_parameter_types(
        mut self,
        parameter_types: Option<Vec<String>>,
    ) -> Self {
        self.parameter_types = parameter_types;
        self
    }
}

/// One entry of the [`TokenMap`](super::TokenMap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub start: usize,
    pub length: usize,
    pub category: TokenCategory,
    pub link: Option<SemanticLink>,
}

impl TokenRecord {
    pub fn new(
        start: usize,
        length: usize,
        category: TokenCategory,
    ) -> Self {
        Self {
            start,
            length,
            category,
            link: None,
        }
    }

    pub fn with_link(
        mut self,
        link: Option<SemanticLink>,
    ) -> Self {
        self.link = link;
        self
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// True when `offset` lies strictly after the start and before the end.
    pub fn strictly_contains(
        &self,
        offset: usize,
    ) -> bool {
        self.start < offset && offset < self.end()
    }
}
