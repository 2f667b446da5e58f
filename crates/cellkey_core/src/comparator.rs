//! The standard cell comparator.
//!
//! Cells sort by:
//! 1. row, as unsigned bytes
//! 2. column: family, then qualifier
//! 3. timestamp, descending
//! 4. type byte, descending
//! 5. version-sequence, descending (unless ignored)
//!
//! Descending timestamps and sequences put the newest version of a
//! column first, so a forward scan meets the latest value before older
//! ones. Descending type bytes put delete markers ahead of the puts they
//! shadow at the same timestamp.
//!
//! Comparators are stateless. Use the [`STANDARD`] and
//! [`CATALOG`](crate::catalog::CATALOG) statics; both are safe to share
//! across any number of threads.

use crate::catalog::CATALOG;
use crate::cell::Cell;
use crate::segment::{compare_segments, Segment};
use crate::types::CellType;
use std::cmp::Ordering;
use std::fmt;

/// The comparator for every table except the catalog.
pub static STANDARD: StandardComparator = StandardComparator::new();

/// Compares timestamps in descending order: the larger timestamp sorts first.
#[inline]
#[must_use]
pub fn compare_timestamps(left: i64, right: i64) -> Ordering {
    right.cmp(&left)
}

/// A total order over cells.
///
/// Implementations must be antisymmetric (`compare(a, b)` is the reverse
/// of `compare(b, a)`), reflexive and transitive, whatever the backing of
/// either cell.
pub trait CellComparator: Send + Sync + fmt::Debug {
    /// Which comparator this is.
    fn kind(&self) -> ComparatorKind;

    /// Full comparison. With `ignore_sequence` the version-sequence step is
    /// skipped, which file readers use when sequence ids carry no ordering
    /// meaning across files.
    fn compare(&self, left: &dyn Cell, right: &dyn Cell, ignore_sequence: bool) -> Ordering;

    /// Compares row keys only.
    fn compare_rows(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering;

    /// Compares a cell's row against raw row bytes, such as a scan's stop row.
    fn compare_row_to(&self, left: &dyn Cell, row: Segment<'_>) -> Ordering;

    /// Everything after the row: column, timestamp, type and
    /// version-sequence. Callers use this when the rows are already known
    /// to be equal.
    fn compare_without_row(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering;

    /// Family, then qualifier.
    fn compare_columns(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering;

    /// Column families only.
    fn compare_families(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering;

    /// Column qualifiers only.
    fn compare_qualifiers(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering;

    /// Timestamps, descending.
    fn compare_cell_timestamps(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        compare_timestamps(left.timestamp(), right.timestamp())
    }

    /// The order sorted in-memory structures use: full comparison
    /// including the version-sequence.
    fn compare_cells(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.compare(left, right, false)
    }
}

/// Selects one of the two comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparatorKind {
    /// Plain byte-wise row ordering.
    Standard,
    /// Three-part row ordering for the catalog table.
    Catalog,
}

impl ComparatorKind {
    /// The shared comparator instance for this kind.
    #[must_use]
    pub fn comparator(self) -> &'static dyn CellComparator {
        match self {
            ComparatorKind::Standard => &STANDARD,
            ComparatorKind::Catalog => &CATALOG,
        }
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparatorKind::Standard => f.write_str("standard"),
            ComparatorKind::Catalog => f.write_str("catalog"),
        }
    }
}

/// Byte-wise row ordering followed by the column, timestamp, type and
/// sequence steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardComparator;

impl StandardComparator {
    /// Creates the comparator. Prefer the shared [`STANDARD`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Steps 2–5, for callers that have already ordered the rows.
    pub(crate) fn compare_after_rows(
        &self,
        left: &dyn Cell,
        right: &dyn Cell,
        ignore_sequence: bool,
    ) -> Ordering {
        match self.compare_key_without_row(left, right) {
            Ordering::Equal if !ignore_sequence => {
                // Later edits carry larger sequence ids and sort first.
                right.sequence_id().cmp(&left.sequence_id())
            }
            ord => ord,
        }
    }

    /// Steps 2–4: column, timestamp and type, without the sequence.
    fn compare_key_without_row(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        // A last-on-row boundary sorts after every real cell of its row,
        // whatever the timestamp. Two boundaries fall through to the
        // ordinary steps so the order stays reflexive.
        match (is_last_on_row(left), is_last_on_row(right)) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => {}
        }

        let left_family = left.family();
        let right_family = right.family();
        if left_family.len() != right_family.len() {
            // When family lengths differ the family comparison alone
            // decides; the qualifier is never inspected.
            return compare_segments(left_family, right_family);
        }

        compare_segments(left_family, right_family)
            .then_with(|| self.compare_qualifiers(left, right))
            .then_with(|| compare_timestamps(left.timestamp(), right.timestamp()))
            // Higher type codes first: Maximum (255) leads, Minimum (0) trails.
            .then_with(|| right.type_byte().cmp(&left.type_byte()))
    }
}

/// Whether `cell` is a last-on-row boundary: no column and the `Minimum` type.
#[inline]
fn is_last_on_row(cell: &dyn Cell) -> bool {
    cell.family().is_empty()
        && cell.qualifier().is_empty()
        && cell.type_byte() == CellType::Minimum.code()
}

impl CellComparator for StandardComparator {
    fn kind(&self) -> ComparatorKind {
        ComparatorKind::Standard
    }

    fn compare(&self, left: &dyn Cell, right: &dyn Cell, ignore_sequence: bool) -> Ordering {
        match self.compare_rows(left, right) {
            Ordering::Equal => self.compare_after_rows(left, right, ignore_sequence),
            ord => ord,
        }
    }

    #[inline]
    fn compare_rows(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        // Scanners often compare a cell against itself at the start of a row.
        if std::ptr::addr_eq(left, right) {
            return Ordering::Equal;
        }
        compare_segments(left.row(), right.row())
    }

    #[inline]
    fn compare_row_to(&self, left: &dyn Cell, row: Segment<'_>) -> Ordering {
        compare_segments(left.row(), row)
    }

    fn compare_without_row(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.compare_after_rows(left, right, false)
    }

    fn compare_columns(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        self.compare_families(left, right)
            .then_with(|| self.compare_qualifiers(left, right))
    }

    #[inline]
    fn compare_families(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        compare_segments(left.family(), right.family())
    }

    #[inline]
    fn compare_qualifiers(&self, left: &dyn Cell, right: &dyn Cell) -> Ordering {
        compare_segments(left.qualifier(), right.qualifier())
    }
}

/// Sorts cells into the comparator's full order (sequence ids included).
pub fn sort_cells<C: Cell>(comparator: &dyn CellComparator, cells: &mut [C]) {
    cells.sort_by(|a, b| comparator.compare(a, b, false));
}
