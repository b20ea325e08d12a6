use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

use crate::index::IndexError;

/// Every way a run can fail. All variants abort the run before any output
/// is written.
#[derive(Debug)]
pub enum HighlightError {
    /// A semantic event points at bytes the lexical pass never indexed: the
    /// two fact streams disagree about the file content.
    Consistency {
        offset: usize,
        event: &'static str,
        context: String,
    },
    /// The lexical stream or a pass broke the coverage invariant.
    Index(IndexError),
    /// The compiler front end could not be run or failed.
    FrontEnd {
        command: String,
        reason: String,
    },
    /// The AST dump could not be decoded.
    AstJson(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Config {
        path: PathBuf,
        reason: String,
    },
}

impl HighlightError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for HighlightError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Consistency {
                offset,
                event,
                context,
            } => {
                write!(
                    f,
                    "{event} at offset {offset} does not match any lexical token ({context}); \
                     the lexical and semantic passes disagree about the file content"
                )
            },
            Self::Index(error) => write!(f, "token index is inconsistent: {error}"),
            Self::FrontEnd {
                command,
                reason,
            } => write!(f, "{command} failed: {reason}"),
            Self::AstJson(error) => write!(f, "could not decode the clang AST dump: {error}"),
            Self::Io {
                path,
                source,
            } => write!(f, "{}: {source}", path.display()),
            Self::Config {
                path,
                reason,
            } => write!(f, "invalid settings file {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for HighlightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Index(error) => Some(error),
            Self::AstJson(error) => Some(error),
            Self::Io {
                source,
                ..
            } => Some(source),
            _ => None,
        }
    }
}

impl From<IndexError> for HighlightError {
    fn from(error: IndexError) -> Self {
        Self::Index(error)
    }
}

impl From<serde_json::Error> for HighlightError {
    fn from(error: serde_json::Error) -> Self {
        Self::AstJson(error)
    }
}
