//! Preprocessing entities and the pass that folds them into the index.

mod collapse;

use std::sync::Arc;

use crate::location::DeclLocation;

pub use self::collapse::{CollapseStats, collapse_preprocessing};

/// `#include <foo.h>`: spans from `#` to the end of the header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionDirective {
    pub file: Arc<str>,
    pub start: usize,
    pub end: usize,
    /// Header name as written, without delimiters.
    pub spelled: String,
    /// Resolved path of the included file, when the front end knows it.
    pub included: Option<String>,
}

/// A macro invoked in the annotated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpansion {
    pub file: Arc<str>,
    /// Offset of the macro name at the expansion site.
    pub offset: usize,
    pub name: String,
    pub definition: Option<DeclLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreprocessingEntity {
    Inclusion(InclusionDirective),
    MacroExpansion(MacroExpansion),
}

impl PreprocessingEntity {
    pub fn file(&self) -> &str {
        match self {
            PreprocessingEntity::Inclusion(d) => &d.file,
            PreprocessingEntity::MacroExpansion(m) => &m.file,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            PreprocessingEntity::Inclusion(d) => d.start,
            PreprocessingEntity::MacroExpansion(m) => m.offset,
        }
    }
}
