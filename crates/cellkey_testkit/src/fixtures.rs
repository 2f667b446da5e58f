//! Cell fixtures and test setup helpers.

use cellkey_core::{AnyCell, CellBuilder, CellType};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Physical layout to build a cell in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// [`cellkey_core::ArrayCell`].
    Array,
    /// [`cellkey_core::BufferCell`].
    Buffer,
}

impl Backing {
    /// Both backings, array first.
    pub const ALL: [Backing; 2] = [Backing::Array, Backing::Buffer];

    /// Builds `builder` in this backing.
    pub fn build(self, builder: CellBuilder) -> AnyCell {
        match self {
            Backing::Array => builder.build_array().expect("valid fixture cell").into(),
            Backing::Buffer => builder.build_buffer().expect("valid fixture cell").into(),
        }
    }
}

/// A `Put` builder for `row/family:qualifier` at `timestamp`.
pub fn put_builder(row: &str, family: &str, qualifier: &str, timestamp: i64) -> CellBuilder {
    CellBuilder::new(row)
        .family(family)
        .qualifier(qualifier)
        .timestamp(timestamp)
}

/// An array-backed `Put` cell.
pub fn put(row: &str, family: &str, qualifier: &str, timestamp: i64) -> AnyCell {
    Backing::Array.build(put_builder(row, family, qualifier, timestamp))
}

/// A buffer-backed `Delete` cell.
pub fn delete(row: &str, family: &str, qualifier: &str, timestamp: i64) -> AnyCell {
    Backing::Buffer.build(
        put_builder(row, family, qualifier, timestamp).cell_type(CellType::Delete),
    )
}

/// A cell with every key field spelled out.
pub fn cell(
    backing: Backing,
    row: &str,
    column: (&str, &str),
    timestamp: i64,
    type_byte: u8,
    sequence_id: i64,
) -> AnyCell {
    backing.build(
        put_builder(row, column.0, column.1, timestamp)
            .type_byte(type_byte)
            .sequence_id(sequence_id),
    )
}

/// The same content as an array cell and as a buffer cell.
pub fn both_backings(builder: CellBuilder) -> (AnyCell, AnyCell) {
    (
        Backing::Array.build(builder.clone()),
        Backing::Buffer.build(builder),
    )
}

/// A catalog row key: `<table>,<descriptor>,<region id>`.
pub fn catalog_row(table: &str, descriptor: &str, region_id: &str) -> String {
    format!("{table},{descriptor},{region_id}")
}

/// A buffer-backed cell in the catalog's `info:regioninfo` column.
pub fn catalog_cell(row: &str) -> AnyCell {
    Backing::Buffer.build(put_builder(row, "info", "regioninfo", 1))
}

static TRACING: Once = Once::new();

/// Installs a fmt subscriber filtered by `RUST_LOG`, once per process.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
