//! Buffer-backed cells.

use super::{check_key_lengths, fmt_cell, same_content, Cell};
use crate::error::{CellError, CellResult};
use crate::segment::Segment;
use bytes::Bytes;
use std::fmt;
use std::ops::Range;

/// Where each field of a [`BufferCell`] sits inside its buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    /// Row position range.
    pub row: Range<usize>,
    /// Family position range.
    pub family: Range<usize>,
    /// Qualifier position range.
    pub qualifier: Range<usize>,
    /// Value position range.
    pub value: Range<usize>,
}

impl BufferLayout {
    fn validate(&self, buffer_len: usize) -> CellResult<()> {
        for range in [&self.row, &self.family, &self.qualifier, &self.value] {
            if range.start > range.end || range.end > buffer_len {
                return Err(CellError::out_of_bounds(
                    range.start,
                    range.end.saturating_sub(range.start),
                    buffer_len,
                ));
            }
        }
        Ok(())
    }
}

/// A cell whose fields are position ranges in one shared [`Bytes`] buffer.
///
/// Cloning is cheap: the buffer is reference counted, so many cells can
/// point into the same block without copying it.
#[derive(Debug, Clone)]
pub struct BufferCell {
    buffer: Bytes,
    layout: BufferLayout,
    timestamp: i64,
    type_byte: u8,
    sequence_id: i64,
}

impl BufferCell {
    /// Creates a cell over `buffer` using the given field positions.
    ///
    /// Every range must lie inside the buffer, and the row and family must
    /// respect the key length limits.
    pub fn new(
        buffer: Bytes,
        layout: BufferLayout,
        timestamp: i64,
        type_byte: u8,
        sequence_id: i64,
    ) -> CellResult<Self> {
        layout.validate(buffer.len())?;
        check_key_lengths(layout.row.len(), layout.family.len())?;
        Ok(Self {
            buffer,
            layout,
            timestamp,
            type_byte,
            sequence_id,
        })
    }

    /// The shared buffer this cell points into.
    #[must_use]
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Field positions inside the buffer.
    #[must_use]
    pub fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    /// Assigns the version-sequence. The storage engine does this once, at insertion.
    pub fn set_sequence_id(&mut self, sequence_id: i64) {
        self.sequence_id = sequence_id;
    }

    #[inline]
    fn segment(&self, range: &Range<usize>) -> Segment<'_> {
        Segment::buffer(&self.buffer, range.start, range.end - range.start)
    }
}

impl Cell for BufferCell {
    #[inline]
    fn row(&self) -> Segment<'_> {
        self.segment(&self.layout.row)
    }

    #[inline]
    fn family(&self) -> Segment<'_> {
        self.segment(&self.layout.family)
    }

    #[inline]
    fn qualifier(&self) -> Segment<'_> {
        self.segment(&self.layout.qualifier)
    }

    #[inline]
    fn value(&self) -> Segment<'_> {
        self.segment(&self.layout.value)
    }

    #[inline]
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[inline]
    fn type_byte(&self) -> u8 {
        self.type_byte
    }

    #[inline]
    fn sequence_id(&self) -> i64 {
        self.sequence_id
    }
}

impl PartialEq for BufferCell {
    fn eq(&self, other: &Self) -> bool {
        same_content(self, other)
    }
}

impl Eq for BufferCell {}

impl fmt::Display for BufferCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cell(self, f)
    }
}
