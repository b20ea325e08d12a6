use std::{
    collections::{BTreeMap, btree_map},
    fmt::{Display, Formatter},
    ops::{Bound, Range},
};

use super::TokenRecord;
use crate::token::{RawToken, classify};

/// Ordered, offset-keyed table of [`TokenRecord`]s over one source buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    records: BTreeMap<usize, TokenRecord>,
    source_len: usize,
}

/// A piece of the source buffer: either bytes covered by a record or an
/// unindexed gap between records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Gap(Range<usize>),
    Token(&'a TokenRecord),
}

impl TokenMap {
    pub fn new(source_len: usize) -> Self {
        Self {
            records: BTreeMap::new(),
            source_len,
        }
    }

    /// Build the index from the lexical stream, classifying every token.
    pub fn populate(
        source: &[u8],
        tokens: &[RawToken],
    ) -> Result<Self, IndexError> {
        let mut map = Self::new(source.len());
        for token in tokens {
            let text = token.text(source).ok_or(IndexError::OutOfBounds {
                start: token.offset,
                end: token.end(),
                source_len: source.len(),
            })?;
            map.insert(TokenRecord::new(token.offset, token.length, classify(token.kind, text)))?;
        }
        Ok(map)
    }

    /// Insert a record that must not overlap any existing one.
    pub fn insert(
        &mut self,
        record: TokenRecord,
    ) -> Result<(), IndexError> {
        if record.end() > self.source_len {
            return Err(IndexError::OutOfBounds {
                start: record.start,
                end: record.end(),
                source_len: self.source_len,
            });
        }
        if let Some(existing) = self.records.get(&record.start) {
            return Err(IndexError::Overlap {
                start: record.start,
                previous_end: existing.end(),
            });
        }
        if let Some((_, previous)) = self.records.range(..record.start).next_back()
            && previous.end() > record.start
        {
            return Err(IndexError::Overlap {
                start: record.start,
                previous_end: previous.end(),
            });
        }
        if let Some((&next_start, _)) = self.records.range((Bound::Excluded(record.start), Bound::Unbounded)).next()
            && next_start < record.end()
        {
            return Err(IndexError::Overlap {
                start: next_start,
                previous_end: record.end(),
            });
        }
        self.records.insert(record.start, record);
        Ok(())
    }

    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending offset order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TokenRecord> + '_ {
        self.records.values()
    }

    pub fn get(
        &self,
        offset: usize,
    ) -> Option<&TokenRecord> {
        self.records.get(&offset)
    }

    pub fn get_mut(
        &mut self,
        offset: usize,
    ) -> Option<&mut TokenRecord> {
        self.records.get_mut(&offset)
    }

    /// Records starting at or after `offset`.
    pub fn lower_bound(
        &self,
        offset: usize,
    ) -> impl Iterator<Item = &TokenRecord> + '_ {
        self.records.range(offset..).map(|(_, record)| record)
    }

    /// The record covering `offset`, whether it starts there or not.
    pub fn containing(
        &self,
        offset: usize,
    ) -> Option<&TokenRecord> {
        self.records
            .range(..=offset)
            .next_back()
            .map(|(_, record)| record)
            .filter(|record| record.start == offset || record.strictly_contains(offset))
    }

    /// Return the record starting at `offset`, splitting the record that
    /// strictly contains `offset` if necessary.
    ///
    /// The second half keeps the category of the split record but not its
    /// link. Calling this twice with the same offset returns the same record
    /// and does not mutate the index again.
    pub fn get_or_split(
        &mut self,
        offset: usize,
    ) -> Result<&mut TokenRecord, IndexError> {
        if self.records.contains_key(&offset) {
            return self.records.get_mut(&offset).ok_or(IndexError::NotFound {
                offset,
            });
        }
        let (start, end, category) = match self.records.range(..offset).next_back() {
            Some((&start, record)) if record.strictly_contains(offset) => (start, record.end(), record.category),
            _ => {
                return Err(IndexError::NotFound {
                    offset,
                });
            },
        };
        if let Some(first) = self.records.get_mut(&start) {
            first.length = offset - start;
        }
        let second = TokenRecord::new(offset, end - offset, category);
        Ok(self.records.entry(offset).or_insert(second))
    }

    /// Replace every record inside `[start, end)` with `replacement`.
    ///
    /// Records straddling either bound are split first so the bytes outside
    /// the range stay covered. Returns the number of records removed.
    pub fn replace_range(
        &mut self,
        start: usize,
        end: usize,
        replacement: TokenRecord,
    ) -> Result<usize, IndexError> {
        if replacement.start != start || replacement.end() != end {
            return Err(IndexError::SpanMismatch {
                expected: start..end,
                found: replacement.start..replacement.end(),
            });
        }
        if end > self.source_len {
            return Err(IndexError::OutOfBounds {
                start,
                end,
                source_len: self.source_len,
            });
        }

        for bound in [start, end] {
            if self.containing(bound).is_some_and(|record| record.start != bound) {
                self.get_or_split(bound)?;
            }
        }

        let mut covered = self.records.split_off(&start);
        let mut rest = covered.split_off(&end);
        let removed = covered.len();

        self.records.insert(start, replacement);
        self.records.append(&mut rest);
        Ok(removed)
    }

    /// Walk the whole buffer as records and the gaps between them.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            records: self.records.values(),
            pending: None,
            cursor: 0,
            source_len: self.source_len,
        }
    }

    /// Verify that records are keyed by their start, ordered, disjoint and
    /// inside the buffer.
    pub fn check_coverage(&self) -> Result<(), IndexError> {
        let mut previous_end = 0;
        for (&key, record) in &self.records {
            if key != record.start {
                return Err(IndexError::SpanMismatch {
                    expected: key..key + record.length,
                    found: record.start..record.end(),
                });
            }
            if record.start < previous_end {
                return Err(IndexError::Overlap {
                    start: record.start,
                    previous_end,
                });
            }
            if record.end() > self.source_len {
                return Err(IndexError::OutOfBounds {
                    start: record.start,
                    end: record.end(),
                    source_len: self.source_len,
                });
            }
            previous_end = record.end();
        }
        Ok(())
    }

    /// Human-readable neighbourhood of `offset`, for diagnostics.
    pub fn describe_around(
        &self,
        offset: usize,
    ) -> String {
        let before = self.records.range(..=offset).next_back().map(|(_, record)| record);
        let after = self.records.range((Bound::Excluded(offset), Bound::Unbounded)).next().map(|(_, record)| record);
        let describe = |record: Option<&TokenRecord>| match record {
            Some(record) => format!("[{}, {}) {}", record.start, record.end(), record.category),
            None => "none".to_string(),
        };
        format!("previous token {}, next token {}", describe(before), describe(after))
    }
}

/// Iterator returned by [`TokenMap::segments`].
pub struct Segments<'a> {
    records: btree_map::Values<'a, usize, TokenRecord>,
    pending: Option<&'a TokenRecord>,
    cursor: usize,
    source_len: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.pending.take().or_else(|| self.records.next());
        match record {
            Some(record) if record.start > self.cursor => {
                let gap = self.cursor..record.start;
                self.cursor = record.start;
                self.pending = Some(record);
                Some(Segment::Gap(gap))
            },
            Some(record) => {
                self.cursor = self.cursor.max(record.end());
                Some(Segment::Token(record))
            },
            None if self.cursor < self.source_len => {
                let gap = self.cursor..self.source_len;
                self.cursor = self.source_len;
                Some(Segment::Gap(gap))
            },
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    NotFound {
        offset: usize,
    },
    OutOfBounds {
        start: usize,
        end: usize,
        source_len: usize,
    },
    Overlap {
        start: usize,
        previous_end: usize,
    },
    SpanMismatch {
        expected: Range<usize>,
        found: Range<usize>,
    },
}

impl Display for IndexError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::NotFound {
                offset,
            } => write!(f, "no token starts at or covers offset {offset}"),
            Self::OutOfBounds {
                start,
                end,
                source_len,
            } => {
                write!(f, "token [{start}, {end}) exceeds the {source_len}-byte source buffer")
            },
            Self::Overlap {
                start,
                previous_end,
            } => {
                write!(f, "token at offset {start} overlaps a token ending at {previous_end}")
            },
            Self::SpanMismatch {
                expected,
                found,
            } => {
                write!(f, "record spans [{}, {}) but [{}, {}) was expected", found.start, found.end, expected.start, expected.end)
            },
        }
    }
}

impl std::error::Error for IndexError {}

#[cfg(test)]
#[path = "../../tests/src/index/token_map_tests.rs"]
mod tests;
