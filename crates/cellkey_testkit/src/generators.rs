//! Property-based test generators using proptest.
//!
//! Key bytes are drawn from a small alphabet so that generated cells
//! collide on rows and columns often enough to exercise every
//! comparison step, including the boundary type codes.

use crate::fixtures::Backing;
use cellkey_core::{AnyCell, CellBuilder, CellType, CATALOG_DELIMITER};
use proptest::prelude::*;

/// Bytes keys are built from: a few letters, the catalog delimiter, and
/// the extremes of the unsigned range.
const KEY_ALPHABET: [u8; 7] = [b'a', b'b', b'z', CATALOG_DELIMITER, b'!', 0x00, 0xff];

/// Plain-data description of a cell, buildable in either backing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFields {
    /// Row key.
    pub row: Vec<u8>,
    /// Column family.
    pub family: Vec<u8>,
    /// Column qualifier.
    pub qualifier: Vec<u8>,
    /// Value.
    pub value: Vec<u8>,
    /// Timestamp.
    pub timestamp: i64,
    /// Raw type byte.
    pub type_byte: u8,
    /// Version-sequence.
    pub sequence_id: i64,
}

impl CellFields {
    /// A builder holding these fields.
    pub fn builder(&self) -> CellBuilder {
        CellBuilder::new(&self.row)
            .family(&self.family)
            .qualifier(&self.qualifier)
            .value(&self.value)
            .timestamp(self.timestamp)
            .type_byte(self.type_byte)
            .sequence_id(self.sequence_id)
    }

    /// Builds the cell in `backing`.
    pub fn build(&self, backing: Backing) -> AnyCell {
        backing.build(self.builder())
    }
}

/// Strategy for key bytes up to `max_len` long.
pub fn key_bytes_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(KEY_ALPHABET.to_vec()), 0..=max_len)
}

/// Strategy for type bytes, biased towards the known codes.
pub fn type_byte_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![
        4 => prop::sample::select(vec![
            CellType::Minimum.code(),
            CellType::Put.code(),
            CellType::Delete.code(),
            CellType::DeleteColumn.code(),
            CellType::DeleteFamily.code(),
            CellType::Maximum.code(),
        ]),
        1 => any::<u8>(),
    ]
}

/// Strategy for timestamps, including both extremes.
pub fn timestamp_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        3 => 0i64..4,
        1 => Just(i64::MIN),
        1 => Just(i64::MAX),
        1 => any::<i64>(),
    ]
}

/// Strategy for cell contents.
pub fn cell_fields_strategy() -> impl Strategy<Value = CellFields> {
    (
        key_bytes_strategy(3),
        key_bytes_strategy(2),
        key_bytes_strategy(2),
        prop::collection::vec(any::<u8>(), 0..4),
        timestamp_strategy(),
        type_byte_strategy(),
        0i64..4,
    )
        .prop_map(
            |(row, family, qualifier, value, timestamp, type_byte, sequence_id)| CellFields {
                row,
                family,
                qualifier,
                value,
                timestamp,
                type_byte,
                sequence_id,
            },
        )
}

/// Strategy for a backing.
pub fn backing_strategy() -> impl Strategy<Value = Backing> {
    prop_oneof![Just(Backing::Array), Just(Backing::Buffer)]
}

/// Strategy for cells in a random backing.
pub fn any_cell_strategy() -> impl Strategy<Value = AnyCell> {
    (cell_fields_strategy(), backing_strategy())
        .prop_map(|(fields, backing)| fields.build(backing))
}

/// Strategy for catalog-style rows: three parts, each delimiter optional.
pub fn catalog_row_strategy() -> impl Strategy<Value = Vec<u8>> {
    let part = || prop::collection::vec(prop::sample::select(b"ab!z".to_vec()), 0..3);
    (part(), any::<bool>(), part(), any::<bool>(), part()).prop_map(
        |(table, first, middle, last, region_id)| {
            let mut row = table;
            if first {
                row.push(CATALOG_DELIMITER);
                row.extend(middle);
                if last {
                    row.push(CATALOG_DELIMITER);
                    row.extend(region_id);
                }
            }
            row
        },
    )
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
