//! Row ordering for the catalog table.
//!
//! Catalog row keys have three parts joined by [`CATALOG_DELIMITER`]:
//!
//! ```text
//! <table>,<region descriptor>,<region id>
//! ```
//!
//! The descriptor may itself contain the delimiter, so the table part ends
//! at the *first* delimiter and the region id starts after the *last* one.
//! Comparing the parts one by one sorts regions by table first, where a
//! plain byte comparison would let bytes below the delimiter in a table
//! name interleave the regions of different tables.
//!
//! [`CatalogComparator`] replaces only the row step of the
//! [`StandardComparator`]; every other step is delegated to it.

use crate::cell::Cell;
use crate::comparator::{CellComparator, ComparatorKind, StandardComparator};
use crate::segment::{compare_segments, Segment};
use std::cmp::Ordering;

/// Separator between the parts of a catalog row key.
pub const CATALOG_DELIMITER: u8 = b',';

/// The comparator for the catalog table.
pub static CATALOG: CatalogComparator = CatalogComparator::new();

/// Orders catalog rows part by part and defers to a [`StandardComparator`]
/// for everything after the row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogComparator {
    standard: StandardComparator,
}

impl CatalogComparator {
    /// Creates the comparator. Prefer the shared [`CATALOG`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            standard: StandardComparator::new(),
        }
    }
}

/// Compares two catalog row keys part by part.
///
/// A row with no delimiter is all table part. When the parts compared so
/// far are equal and only one side has the next delimiter, the side
/// without it sorts first; when neither has it the rows are equal.
#[must_use]
pub fn compare_catalog_rows(left: Segment<'_>, right: Segment<'_>) -> Ordering {
    let left_first = left.find(CATALOG_DELIMITER);
    let right_first = right.find(CATALOG_DELIMITER);

    let ord = compare_segments(head(left, left_first), head(right, right_first));
    if ord != Ordering::Equal {
        return ord;
    }
    let (left_first, right_first) = match (left_first, right_first) {
        (Some(l), Some(r)) => (l, r),
        (l, r) => return missing_delimiter_order(l, r),
    };

    let left_tail = left.tail(left_first + 1);
    let right_tail = right.tail(right_first + 1);
    let left_last = left_tail.rfind(CATALOG_DELIMITER);
    let right_last = right_tail.rfind(CATALOG_DELIMITER);

    let ord = compare_segments(head(left_tail, left_last), head(right_tail, right_last));
    if ord != Ordering::Equal {
        return ord;
    }
    let (left_last, right_last) = match (left_last, right_last) {
        (Some(l), Some(r)) => (l, r),
        (l, r) => return missing_delimiter_order(l, r),
    };

    compare_segments(left_tail.tail(left_last + 1), right_tail.tail(right_last + 1))
}

/// The bytes before `delimiter`, or the whole segment when there is none.
#[inline]
fn head(segment: Segment<'_>, delimiter: Option<usize>) -> Segment<'_> {
    segment.sub(0, delimiter.unwrap_or(segment.len()))
}

#[inline]
fn missing_delimiter_order(left: Option<usize>, right: Option<usize>) -> Ordering {
    match (left, right) {
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl CellComparator for CatalogComparator {
    fn kind(&self) -> ComparatorKind {
        ComparatorKind::Catalog
    }

    fn compare(&self, left: &dyn Cell, right: &dyn Cell, ignore_sequence: bool) -> Ordering {
        match self.compare_rows(left, right) {
            Ordering::Equal => self
                .standard
                .compare_after_rows(left, right, ignore_sequence),
            ord => ord,
        }
    }

    fn compare_rows(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        if std::ptr::addr_eq(left, right) {
            return Ordering::Equal;
        }
        compare_catalog_rows(left.row(), right.row())
    }

    fn compare_row_to(&self, left: &dyn Cell, row: Segment<'_>) -> Ordering {
        compare_catalog_rows(left.row(), row)
    }

    fn compare_without_row(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.standard.compare_without_row(left, right)
    }

    fn compare_columns(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.standard.compare_columns(left, right)
    }

    fn compare_families(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.standard.compare_families(left, right)
    }

    fn compare_qualifiers(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.standard.compare_qualifiers(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{AnyCell, CellBuilder};
    use crate::comparator::STANDARD;
    use bytes::Bytes;

    fn rows(left: &str, right: &str) -> Ordering {
        compare_catalog_rows(
            Segment::from_slice(left.as_bytes()),
            Segment::from_slice(right.as_bytes()),
        )
    }

    fn row_cell(row: &str) -> AnyCell {
        CellBuilder::new(row)
            .family("info")
            .qualifier("regioninfo")
            .timestamp(1)
            .build_buffer()
            .unwrap()
            .into()
    }

    #[test]
    fn empty_descriptor_sorts_before_named_one() {
        assert_eq!(rows("tableA,,1000.abc.", "tableA,region2,1000.abc."), Ordering::Less);
        assert_eq!(rows("tableA,region2,1000.abc.", "tableA,,1000.abc."), Ordering::Greater);
    }

    #[test]
    fn table_part_decides_first() {
        // '!' sorts below ',' so a byte-wise comparison puts "a!b" first.
        let a = row_cell("a,,1");
        let b = row_cell("a!b,,1");
        assert_eq!(CATALOG.compare_rows(&a, &b), Ordering::Less);
        assert_eq!(STANDARD.compare_rows(&a, &b), Ordering::Greater);
    }

    #[test]
    fn descriptor_may_contain_delimiter() {
        assert_eq!(rows("t,a,b,2", "t,a,b,10"), Ordering::Greater);
        assert_eq!(rows("t,a,b,2", "t,a,c,1"), Ordering::Less);
        assert_eq!(rows("t,a,b,1", "t,a,b,1"), Ordering::Equal);
    }

    #[test]
    fn missing_first_delimiter_sorts_first() {
        assert_eq!(rows("t", "t,r,1"), Ordering::Less);
        assert_eq!(rows("t,r,1", "t"), Ordering::Greater);
        assert_eq!(rows("t", "t"), Ordering::Equal);
        assert_eq!(rows("", ""), Ordering::Equal);
        assert_eq!(rows("s", "t,r,1"), Ordering::Less);
    }

    #[test]
    fn missing_last_delimiter_sorts_first() {
        // Only one delimiter: the tail is all descriptor, with no region id.
        assert_eq!(rows("t,r", "t,r,1"), Ordering::Less);
        assert_eq!(rows("t,r,1", "t,r"), Ordering::Greater);
        assert_eq!(rows("t,r", "t,r"), Ordering::Equal);
        assert_eq!(rows("t,", "t,,"), Ordering::Less);
    }

    #[test]
    fn region_id_is_final() {
        assert_eq!(rows("t,r,1", "t,r,2"), Ordering::Less);
        assert_eq!(rows("t,r,", "t,r,0"), Ordering::Less);
    }

    #[test]
    fn row_against_raw_bytes_uses_split() {
        let cell = row_cell("a,,1");
        assert_eq!(
            CATALOG.compare_row_to(&cell, Segment::from_slice(b"a!b,,1")),
            Ordering::Less
        );
        let boundary = Bytes::from_static(b"a,,1");
        assert_eq!(
            CATALOG.compare_row_to(&cell, Segment::from(&boundary)),
            Ordering::Equal
        );
    }

    #[test]
    fn buffer_and_array_rows_agree() {
        let buffer = Bytes::from_static(b"xxt,r,1");
        let array = b"t,r,2yy";
        let left = Segment::buffer(&buffer, 2, 5);
        let right = Segment::array(array, 0, 5);
        assert_eq!(compare_catalog_rows(left, right), Ordering::Less);
        assert_eq!(compare_catalog_rows(right, left), Ordering::Greater);
    }

    #[test]
    fn later_steps_match_standard() {
        let newer: AnyCell = CellBuilder::new("t,r,1")
            .family("info")
            .timestamp(20)
            .build_array()
            .unwrap()
            .into();
        let older: AnyCell = CellBuilder::new("t,r,1")
            .family("info")
            .timestamp(10)
            .sequence_id(99)
            .build_buffer()
            .unwrap()
            .into();
        assert_eq!(CATALOG.compare_cells(&newer, &older), Ordering::Less);
        assert_eq!(
            CATALOG.compare_without_row(&newer, &older),
            STANDARD.compare_without_row(&newer, &older)
        );
        assert_eq!(CATALOG.compare_columns(&newer, &older), Ordering::Equal);

        let resequenced: AnyCell = CellBuilder::new("t,r,1")
            .family("info")
            .timestamp(10)
            .sequence_id(100)
            .build_array()
            .unwrap()
            .into();
        assert_eq!(CATALOG.compare_without_row(&resequenced, &older), Ordering::Less);
        assert_eq!(CATALOG.kind(), ComparatorKind::Catalog);
    }
}
