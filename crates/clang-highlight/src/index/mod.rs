//! Offset-keyed token index.
//!
//! The index is the engine's only mutable state. Every pass leaves it as a
//! complete, non-overlapping cover of the source buffer: records plus the
//! gaps between them reproduce every byte exactly once.

mod record;
mod token_map;

pub use self::record::{SemanticLink, TokenRecord};
pub use self::token_map::{IndexError, Segment, TokenMap};
