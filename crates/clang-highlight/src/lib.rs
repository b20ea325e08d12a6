pub mod config;
pub mod decl;
pub mod error;
pub mod frontend;
pub mod index;
pub mod location;
pub mod merge;
pub mod pipeline;
pub mod preprocess;
pub mod render;
pub mod token;

pub use config::{HighlightSettings, OutputTarget, RunConfig};
pub use decl::{DeclId, DeclKind, DeclTable, Declaration, canonicalize};
pub use error::HighlightError;
pub use index::{SemanticLink, TokenMap, TokenRecord};
pub use merge::{MatchEvent, MergeContext};
pub use pipeline::{Facts, annotate, write_outputs};
pub use preprocess::PreprocessingEntity;
pub use render::{HtmlOptions, HtmlStyle, PunctuationMode};
pub use token::{LexicalKind, RawToken, TokenCategory};
