//! Checked construction of cells in either backing.

use super::{check_key_lengths, ArrayCell, ArrayField, BufferCell, BufferLayout};
use crate::error::CellResult;
use crate::types::{CellType, LATEST_TIMESTAMP};
use bytes::{BufMut, BytesMut};
use std::sync::Arc;

/// Collects the fields of a cell, then lays them out as an
/// [`ArrayCell`] or a [`BufferCell`].
///
/// Defaults: empty column and value, [`LATEST_TIMESTAMP`],
/// [`CellType::Put`], sequence id 0.
///
/// ```
/// use cellkey_core::{Cell, CellBuilder, CellType};
///
/// let cell = CellBuilder::new("row1")
///     .family("cf")
///     .qualifier("q")
///     .timestamp(100)
///     .cell_type(CellType::Delete)
///     .build_buffer()
///     .unwrap();
/// assert_eq!(cell.row().as_slice(), b"row1");
/// ```
#[derive(Debug, Clone)]
pub struct CellBuilder {
    row: Vec<u8>,
    family: Vec<u8>,
    qualifier: Vec<u8>,
    value: Vec<u8>,
    timestamp: i64,
    type_byte: u8,
    sequence_id: i64,
}

impl CellBuilder {
    /// Starts a cell for `row`.
    pub fn new(row: impl AsRef<[u8]>) -> Self {
        Self {
            row: row.as_ref().to_vec(),
            family: Vec::new(),
            qualifier: Vec::new(),
            value: Vec::new(),
            timestamp: LATEST_TIMESTAMP,
            type_byte: CellType::Put.code(),
            sequence_id: 0,
        }
    }

    /// Sets the column family.
    #[must_use]
    pub fn family(mut self, family: impl AsRef<[u8]>) -> Self {
        self.family = family.as_ref().to_vec();
        self
    }

    /// Sets the column qualifier.
    #[must_use]
    pub fn qualifier(mut self, qualifier: impl AsRef<[u8]>) -> Self {
        self.qualifier = qualifier.as_ref().to_vec();
        self
    }

    /// Sets the value.
    #[must_use]
    pub fn value(mut self, value: impl AsRef<[u8]>) -> Self {
        self.value = value.as_ref().to_vec();
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the type from a known [`CellType`].
    #[must_use]
    pub const fn cell_type(mut self, kind: CellType) -> Self {
        self.type_byte = kind.code();
        self
    }

    /// Sets a raw type byte, known or not.
    #[must_use]
    pub const fn type_byte(mut self, type_byte: u8) -> Self {
        self.type_byte = type_byte;
        self
    }

    /// Sets the version-sequence.
    #[must_use]
    pub const fn sequence_id(mut self, sequence_id: i64) -> Self {
        self.sequence_id = sequence_id;
        self
    }

    /// Packs all fields into one shared array and returns an array-backed cell.
    pub fn build_array(self) -> CellResult<ArrayCell> {
        check_key_lengths(self.row.len(), self.family.len())?;
        let ranges = self.ranges();
        let array: Arc<[u8]> = Arc::from(self.concat());
        tracing::trace!(
            row_len = ranges.row.len(),
            array_len = array.len(),
            "built array cell"
        );

        let field = |range: std::ops::Range<usize>| {
            ArrayField::new(array.clone(), range.start, range.end - range.start)
        };
        ArrayCell::from_fields(
            field(ranges.row)?,
            field(ranges.family)?,
            field(ranges.qualifier)?,
            field(ranges.value)?,
            self.timestamp,
            self.type_byte,
            self.sequence_id,
        )
    }

    /// Packs all fields into one [`bytes::Bytes`] buffer and returns a
    /// buffer-backed cell.
    pub fn build_buffer(self) -> CellResult<BufferCell> {
        check_key_lengths(self.row.len(), self.family.len())?;
        let layout = self.ranges();
        let buffer = self.concat_buf().freeze();
        tracing::trace!(
            row_len = layout.row.len(),
            buffer_len = buffer.len(),
            "built buffer cell"
        );
        BufferCell::new(
            buffer,
            layout,
            self.timestamp,
            self.type_byte,
            self.sequence_id,
        )
    }

    fn total_len(&self) -> usize {
        self.row.len() + self.family.len() + self.qualifier.len() + self.value.len()
    }

    fn ranges(&self) -> BufferLayout {
        let row_end = self.row.len();
        let family_end = row_end + self.family.len();
        let qualifier_end = family_end + self.qualifier.len();
        let value_end = qualifier_end + self.value.len();
        BufferLayout {
            row: 0..row_end,
            family: row_end..family_end,
            qualifier: family_end..qualifier_end,
            value: qualifier_end..value_end,
        }
    }

    fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len());
        for part in [&self.row, &self.family, &self.qualifier, &self.value] {
            out.extend_from_slice(part);
        }
        out
    }

    fn concat_buf(&self) -> BytesMut {
        let mut out = BytesMut::with_capacity(self.total_len());
        for part in [&self.row, &self.family, &self.qualifier, &self.value] {
            out.put_slice(part);
        }
        out
    }
}
