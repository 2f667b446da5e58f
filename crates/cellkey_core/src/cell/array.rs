//! Array-backed cells.

use super::{check_key_lengths, fmt_cell, same_content, Cell};
use crate::error::CellResult;
use crate::segment::{check_bounds, Segment};
use std::fmt;
use std::sync::Arc;

/// A `(offset, len)` slice of a shared byte array.
///
/// Several fields may share one array, each with its own offset.
#[derive(Debug, Clone)]
pub struct ArrayField {
    array: Arc<[u8]>,
    offset: usize,
    len: usize,
}

impl ArrayField {
    /// Creates a field over `len` bytes of `array` starting at `offset`.
    pub fn new(array: Arc<[u8]>, offset: usize, len: usize) -> CellResult<Self> {
        check_bounds(offset, len, array.len())?;
        Ok(Self { array, offset, len })
    }

    /// A field spanning the whole array.
    #[must_use]
    pub fn whole(array: Arc<[u8]>) -> Self {
        let len = array.len();
        Self {
            array,
            offset: 0,
            len,
        }
    }

    /// An empty field.
    #[must_use]
    pub fn empty() -> Self {
        Self::whole(Arc::from(&[][..]))
    }

    /// Offset of the field inside its array.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether two fields point into the same array allocation.
    #[must_use]
    pub fn shares_array(&self, other: &ArrayField) -> bool {
        Arc::ptr_eq(&self.array, &other.array)
    }

    #[inline]
    fn segment(&self) -> Segment<'_> {
        Segment::array(&self.array, self.offset, self.len)
    }
}

impl From<&[u8]> for ArrayField {
    fn from(bytes: &[u8]) -> Self {
        Self::whole(Arc::from(bytes))
    }
}

impl From<Vec<u8>> for ArrayField {
    fn from(bytes: Vec<u8>) -> Self {
        Self::whole(Arc::from(bytes))
    }
}

impl From<&str> for ArrayField {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

/// A cell whose key and value live in plain byte arrays.
#[derive(Debug, Clone)]
pub struct ArrayCell {
    row: ArrayField,
    family: ArrayField,
    qualifier: ArrayField,
    value: ArrayField,
    timestamp: i64,
    type_byte: u8,
    sequence_id: i64,
}

impl ArrayCell {
    /// Assembles a cell from already-sliced fields.
    ///
    /// Fails if the row or family exceeds the key length limits.
    pub fn from_fields(
        row: ArrayField,
        family: ArrayField,
        qualifier: ArrayField,
        value: ArrayField,
        timestamp: i64,
        type_byte: u8,
        sequence_id: i64,
    ) -> CellResult<Self> {
        check_key_lengths(row.len(), family.len())?;
        Ok(Self {
            row,
            family,
            qualifier,
            value,
            timestamp,
            type_byte,
            sequence_id,
        })
    }

    /// Assigns the version-sequence. The storage engine does this once, at insertion.
    pub fn set_sequence_id(&mut self, sequence_id: i64) {
        self.sequence_id = sequence_id;
    }
}

impl Cell for ArrayCell {
    #[inline]
    fn row(&self) -> Segment<'_> {
        self.row.segment()
    }

    #[inline]
    fn family(&self) -> Segment<'_> {
        self.family.segment()
    }

    #[inline]
    fn qualifier(&self) -> Segment<'_> {
        self.qualifier.segment()
    }

    #[inline]
    fn value(&self) -> Segment<'_> {
        self.value.segment()
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

impl PartialEq for ArrayCell {
    fn eq(&self, other: &Self) -> bool {
        same_content(self, other)
    }
}

impl Eq for ArrayCell {}

impl fmt::Display for ArrayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cell(self, f)
    }
}
