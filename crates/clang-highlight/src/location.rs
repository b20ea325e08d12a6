//! Source positions attached to semantic facts.

use std::sync::Arc;

/// A byte offset inside a named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOffset {
    pub file: Arc<str>,
    pub offset: usize,
}

impl FileOffset {
    pub fn new(
        file: impl Into<Arc<str>>,
        offset: usize,
    ) -> Self {
        Self {
            file: file.into(),
            offset,
        }
    }
}

/// Where a semantic event happened.
///
/// For text produced by macro expansion the two variants differ: the
/// spelling location is where the characters were written, the expansion
/// location is where the macro was invoked. Outside macros they coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocation {
    pub spelling: Option<FileOffset>,
    pub expansion: Option<FileOffset>,
}

impl EventLocation {
    /// A location that is not inside a macro expansion.
    pub fn plain(
        file: impl Into<Arc<str>>,
        offset: usize,
    ) -> Self {
        let at = FileOffset::new(file, offset);
        Self {
            spelling: Some(at.clone()),
            expansion: Some(at),
        }
    }

    /// The location that was indexed by the lexical pass.
    ///
    /// Always the spelled position; falls back to the expansion location
    /// only when the front end did not report a spelling.
    pub fn spelled(&self) -> Option<&FileOffset> {
        self.spelling.as_ref().or(self.expansion.as_ref())
    }

    /// Offset of the spelled location when it lies in `file`.
    pub fn offset_in(
        &self,
        file: &str,
    ) -> Option<usize> {
        self.spelled().filter(|at| &*at.file == file).map(|at| at.offset)
    }
}

/// Defining location of a declaration or macro. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclLocation {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl DeclLocation {
    pub fn new(
        file: impl Into<Arc<str>>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}
