//! The cell record model.
//!
//! A cell is one versioned key/value record: row, column (family and
//! qualifier), timestamp, type byte, version-sequence and value. The
//! [`Cell`] trait exposes those fields as zero-copy [`Segment`]s so that
//! comparators never care how a cell is laid out in memory.
//!
//! Two backings exist:
//! - [`ArrayCell`]: fields are slices of one or more shared byte arrays
//! - [`BufferCell`]: fields are position ranges inside one shared
//!   [`bytes::Bytes`] buffer
//!
//! [`AnyCell`] closes over both for heterogeneous collections.

mod array;
mod buffer;
mod builder;

pub use array::{ArrayCell, ArrayField};
pub use buffer::{BufferCell, BufferLayout};
pub use builder::CellBuilder;

use crate::error::{CellError, CellResult};
use crate::segment::Segment;
use crate::types::{CellType, LATEST_TIMESTAMP, OLDEST_TIMESTAMP};
use std::fmt;

/// Longest row key a cell may carry.
pub const MAX_ROW_LENGTH: usize = i16::MAX as usize;

/// Longest column family name a cell may carry.
pub const MAX_FAMILY_LENGTH: usize = u8::MAX as usize;

/// Read access to the fields of a cell.
///
/// Implementations must be immutable for as long as a borrow of any
/// returned segment is alive; comparators rely on that and never copy.
pub trait Cell: fmt::Debug + Send + Sync {
    /// The row key.
    fn row(&self) -> Segment<'_>;

    /// The column family.
    fn family(&self) -> Segment<'_>;

    /// The column qualifier.
    fn qualifier(&self) -> Segment<'_>;

    /// The value.
    fn value(&self) -> Segment<'_>;

    /// Version timestamp.
    fn timestamp(&self) -> i64;

    /// Raw type byte (see [`CellType`]).
    fn type_byte(&self) -> u8;

    /// Version-sequence assigned at insertion; later edits carry larger values.
    fn sequence_id(&self) -> i64;

    /// Decodes the type byte.
    fn cell_type(&self) -> CellResult<CellType> {
        CellType::try_from(self.type_byte())
    }
}

/// A cell in either backing.
///
/// Equality compares content, so an array cell equals a buffer cell
/// holding the same fields.
#[derive(Debug, Clone)]
pub enum AnyCell {
    /// Array-backed cell.
    Array(ArrayCell),
    /// Buffer-backed cell.
    Buffer(BufferCell),
}

impl AnyCell {
    /// Assigns the version-sequence. The storage engine does this once, at insertion.
    pub fn set_sequence_id(&mut self, sequence_id: i64) {
        match self {
            AnyCell::Array(cell) => cell.set_sequence_id(sequence_id),
            AnyCell::Buffer(cell) => cell.set_sequence_id(sequence_id),
        }
    }

    fn inner(&self) -> &dyn Cell {
        match self {
            AnyCell::Array(cell) => cell,
            AnyCell::Buffer(cell) => cell,
        }
    }
}

impl Cell for AnyCell {
    fn row(&self) -> Segment<'_> {
        self.inner().row()
    }

    fn family(&self) -> Segment<'_> {
        self.inner().family()
    }

    fn qualifier(&self) -> Segment<'_> {
        self.inner().qualifier()
    }

    fn value(&self) -> Segment<'_> {
        self.inner().value()
    }

    fn timestamp(&self) -> i64 {
        self.inner().timestamp()
    }

    fn type_byte(&self) -> u8 {
        self.inner().type_byte()
    }

    fn sequence_id(&self) -> i64 {
        self.inner().sequence_id()
    }
}

impl PartialEq for AnyCell {
    fn eq(&self, other: &Self) -> bool {
        same_content(self, other)
    }
}

impl Eq for AnyCell {}

impl From<ArrayCell> for AnyCell {
    fn from(cell: ArrayCell) -> Self {
        AnyCell::Array(cell)
    }
}

impl From<BufferCell> for AnyCell {
    fn from(cell: BufferCell) -> Self {
        AnyCell::Buffer(cell)
    }
}

impl fmt::Display for AnyCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cell(self, f)
    }
}

/// Builds the cell that sorts before every real cell of `row`.
///
/// It has an empty column, the latest timestamp and the `Maximum` type.
pub fn first_on_row(row: Segment<'_>) -> CellResult<ArrayCell> {
    CellBuilder::new(row.as_slice())
        .timestamp(LATEST_TIMESTAMP)
        .cell_type(CellType::Maximum)
        .build_array()
}

/// Builds the cell that sorts after every real cell of `row`.
///
/// There is no finite "last column" to seek to, so this uses an empty
/// column with the `Minimum` type, which comparators place last in the row.
pub fn last_on_row(row: Segment<'_>) -> CellResult<ArrayCell> {
    CellBuilder::new(row.as_slice())
        .timestamp(OLDEST_TIMESTAMP)
        .cell_type(CellType::Minimum)
        .build_array()
}

pub(crate) fn check_key_lengths(row: usize, family: usize) -> CellResult<()> {
    if row > MAX_ROW_LENGTH {
        return Err(CellError::field_too_long("row", row, MAX_ROW_LENGTH));
    }
    if family > MAX_FAMILY_LENGTH {
        return Err(CellError::field_too_long("family", family, MAX_FAMILY_LENGTH));
    }
    Ok(())
}

/// Field-by-field content equality, ignoring backing.
pub(crate) fn same_content(left: &dyn Cell, right: &dyn Cell) -> bool {
    left.row() == right.row()
        && left.family() == right.family()
        && left.qualifier() == right.qualifier()
        && left.timestamp() == right.timestamp()
        && left.type_byte() == right.type_byte()
        && left.sequence_id() == right.sequence_id()
        && left.value() == right.value()
}

/// Renders `row/family:qualifier/timestamp/type/vlen=N/seqid=N`.
pub(crate) fn fmt_cell(cell: &dyn Cell, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_escaped(f, cell.row())?;
    f.write_str("/")?;
    write_escaped(f, cell.family())?;
    f.write_str(":")?;
    write_escaped(f, cell.qualifier())?;
    match cell.cell_type() {
        Ok(kind) => write!(f, "/{}/{}", cell.timestamp(), kind)?,
        Err(_) => write!(f, "/{}/type={}", cell.timestamp(), cell.type_byte())?,
    }
    write!(f, "/vlen={}/seqid={}", cell.value().len(), cell.sequence_id())
}

fn write_escaped(f: &mut fmt::Formatter<'_>, segment: Segment<'_>) -> fmt::Result {
    for &b in segment.as_slice() {
        write!(f, "{}", std::ascii::escape_default(b))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_cell_delegates_to_backing() {
        let builder = CellBuilder::new("r1")
            .family("f")
            .qualifier("q")
            .value("v")
            .timestamp(7)
            .sequence_id(3);
        let array: AnyCell = builder.clone().build_array().unwrap().into();
        let buffer: AnyCell = builder.build_buffer().unwrap().into();

        for cell in [&array, &buffer] {
            assert_eq!(cell.row().as_slice(), b"r1");
            assert_eq!(cell.family().as_slice(), b"f");
            assert_eq!(cell.qualifier().as_slice(), b"q");
            assert_eq!(cell.value().as_slice(), b"v");
            assert_eq!(cell.timestamp(), 7);
            assert_eq!(cell.cell_type(), Ok(CellType::Put));
            assert_eq!(cell.sequence_id(), 3);
        }
        assert!(buffer.row().is_buffer());
        assert!(!array.row().is_buffer());
    }

    #[test]
    fn sequence_id_can_be_assigned() {
        let mut cell: AnyCell = CellBuilder::new("r").build_buffer().unwrap().into();
        assert_eq!(cell.sequence_id(), 0);
        cell.set_sequence_id(42);
        assert_eq!(cell.sequence_id(), 42);
    }

    #[test]
    fn boundary_cells_have_empty_columns() {
        let first = first_on_row(Segment::from_slice(b"r1")).unwrap();
        assert!(first.family().is_empty());
        assert!(first.qualifier().is_empty());
        assert_eq!(first.cell_type(), Ok(CellType::Maximum));
        assert_eq!(first.timestamp(), LATEST_TIMESTAMP);

        let last = last_on_row(Segment::from_slice(b"r1")).unwrap();
        assert!(last.family().is_empty());
        assert_eq!(last.cell_type(), Ok(CellType::Minimum));
    }

    #[test]
    fn display_escapes_binary_keys() {
        let cell: AnyCell = CellBuilder::new(b"r\x01".as_slice())
            .family("f")
            .qualifier("q")
            .value("abc")
            .timestamp(5)
            .cell_type(CellType::Delete)
            .sequence_id(9)
            .build_array()
            .unwrap()
            .into();
        assert_eq!(cell.to_string(), "r\\x01/f:q/5/Delete/vlen=3/seqid=9");
    }

    #[test]
    fn key_length_limits() {
        assert!(check_key_lengths(MAX_ROW_LENGTH, MAX_FAMILY_LENGTH).is_ok());
        assert_eq!(
            check_key_lengths(MAX_ROW_LENGTH + 1, 0),
            Err(CellError::field_too_long("row", MAX_ROW_LENGTH + 1, MAX_ROW_LENGTH))
        );
        assert!(matches!(
            check_key_lengths(1, MAX_FAMILY_LENGTH + 1),
            Err(CellError::FieldTooLong { field: "family", .. })
        ));
    }
}
