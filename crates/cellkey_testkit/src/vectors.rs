//! Ordering test vectors.
//!
//! Each vector lists cells in their expected sorted order under one
//! comparator. Vectors serialize to JSON so other implementations of the
//! same order can be checked against them.

use crate::fixtures::Backing;
use cellkey_core::{sort_cells, AnyCell, CellBuilder, ComparatorKind};
use serde::{Deserialize, Serialize};

/// Which comparator a vector is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorComparator {
    /// The standard comparator.
    Standard,
    /// The catalog comparator.
    Catalog,
}

impl From<VectorComparator> for ComparatorKind {
    fn from(kind: VectorComparator) -> Self {
        match kind {
            VectorComparator::Standard => ComparatorKind::Standard,
            VectorComparator::Catalog => ComparatorKind::Catalog,
        }
    }
}

/// One cell of a vector. Key fields are UTF-8 for readability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorCell {
    /// Row key.
    pub row: String,
    /// Column family.
    #[serde(default)]
    pub family: String,
    /// Column qualifier.
    #[serde(default)]
    pub qualifier: String,
    /// Timestamp.
    pub timestamp: i64,
    /// Raw type byte.
    pub type_code: u8,
    /// Version-sequence.
    #[serde(default)]
    pub sequence_id: i64,
}

impl VectorCell {
    fn build(&self, backing: Backing) -> AnyCell {
        backing.build(
            CellBuilder::new(&self.row)
                .family(&self.family)
                .qualifier(&self.qualifier)
                .timestamp(self.timestamp)
                .type_byte(self.type_code)
                .sequence_id(self.sequence_id),
        )
    }
}

/// A list of cells in expected sorted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Comparator the order applies to.
    pub comparator: VectorComparator,
    /// Cells, smallest first.
    pub expected: Vec<VectorCell>,
}

fn vc(
    row: &str,
    family: &str,
    qualifier: &str,
    timestamp: i64,
    type_code: u8,
    seq: i64,
) -> VectorCell {
    VectorCell {
        row: row.into(),
        family: family.into(),
        qualifier: qualifier.into(),
        timestamp,
        type_code,
        sequence_id: seq,
    }
}

/// The built-in ordering vectors.
pub fn ordering_vectors() -> Vec<OrderingVector> {
    vec![
        OrderingVector {
            id: "rows_unsigned".into(),
            description: "Rows compare as unsigned bytes, prefixes first".into(),
            comparator: VectorComparator::Standard,
            expected: vec![
                vc("a", "f", "q", 1, 4, 0),
                vc("ab", "f", "q", 1, 4, 0),
                vc("az", "f", "q", 1, 4, 0),
                vc("a\u{e9}", "f", "q", 1, 4, 0),
                vc("b", "f", "q", 1, 4, 0),
            ],
        },
        OrderingVector {
            id: "versions_newest_first".into(),
            description: "Within a column: newer timestamp, then higher type, then higher sequence"
                .into(),
            comparator: VectorComparator::Standard,
            expected: vec![
                vc("r", "f", "q", 200, 4, 0),
                vc("r", "f", "q", 100, 8, 1),
                vc("r", "f", "q", 100, 4, 10),
                vc("r", "f", "q", 100, 4, 5),
            ],
        },
        OrderingVector {
            id: "row_boundaries".into(),
            description: "First-on-row leads the row, last-on-row trails it".into(),
            comparator: VectorComparator::Standard,
            expected: vec![
                vc("r1", "", "", i64::MAX, 255, 0),
                vc("r1", "a", "", 5, 4, 0),
                vc("r1", "b", "x", 9, 4, 0),
                vc("r1", "", "", i64::MIN, 0, 0),
                vc("r2", "", "", i64::MAX, 255, 0),
            ],
        },
        OrderingVector {
            id: "catalog_parts".into(),
            description: "Catalog rows sort by table, then descriptor, then region id".into(),
            comparator: VectorComparator::Catalog,
            expected: vec![
                vc("a", "info", "", 1, 4, 0),
                vc("a,,1", "info", "", 1, 4, 0),
                vc("a,,2", "info", "", 1, 4, 0),
                vc("a,r,1", "info", "", 1, 4, 0),
                vc("a,r,s,0", "info", "", 1, 4, 0),
                vc("a!b,,1", "info", "", 1, 4, 0),
                vc("tableA,,1000.abc.", "info", "", 1, 4, 0),
                vc("tableA,region2,1000.abc.", "info", "", 1, 4, 0),
            ],
        },
    ]
}

/// Serializes vectors to pretty JSON.
pub fn vectors_to_json(vectors: &[OrderingVector]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(vectors)
}

/// Parses vectors from JSON.
pub fn vectors_from_json(json: &str) -> serde_json::Result<Vec<OrderingVector>> {
    serde_json::from_str(json)
}

/// Checks that sorting the vector's cells reproduces its expected order,
/// with the input reversed and the backings alternated.
pub fn verify_vector(vector: &OrderingVector) -> Result<(), String> {
    let comparator = ComparatorKind::from(vector.comparator).comparator();

    let expected: Vec<AnyCell> = vector
        .expected
        .iter()
        .map(|cell| cell.build(Backing::Array))
        .collect();
    let mut shuffled: Vec<AnyCell> = vector
        .expected
        .iter()
        .rev()
        .enumerate()
        .map(|(i, cell)| cell.build(Backing::ALL[i % 2]))
        .collect();

    sort_cells(comparator, &mut shuffled);
    if shuffled == expected {
        return Ok(());
    }

    let render =
        |cells: &[AnyCell]| -> Vec<String> { cells.iter().map(ToString::to_string).collect() };
    tracing::warn!(
        id = %vector.id,
        comparator = ?vector.comparator,
        "ordering vector mismatch"
    );
    Err(format!(
        "vector {} sorted to {:?}, expected {:?}",
        vector.id,
        render(&shuffled),
        render(&expected)
    ))
}
