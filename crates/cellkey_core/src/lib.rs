//! # cellkey core
//!
//! Cell records and the total order an LSM storage engine sorts them by.
//!
//! This crate provides:
//! - [`Segment`]: zero-copy byte views over arrays or shared buffers
//! - [`Cell`]: the record model, with [`ArrayCell`] and [`BufferCell`] backings
//! - [`StandardComparator`]: row, column, timestamp (desc), type (desc),
//!   sequence (desc)
//! - [`CatalogComparator`]: the same order with three-part catalog rows
//! - [`ComparatorConfig`]: picks the comparator for a table
//!
//! ## Example
//!
//! ```
//! use cellkey_core::{CellBuilder, CellComparator, STANDARD};
//! use std::cmp::Ordering;
//!
//! let old = CellBuilder::new("row").family("f").timestamp(100).build_array().unwrap();
//! let new = CellBuilder::new("row").family("f").timestamp(200).build_buffer().unwrap();
//!
//! // Newer versions sort first.
//! assert_eq!(STANDARD.compare(&new, &old, false), Ordering::Less);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod cell;
pub mod comparator;
mod config;
mod error;
pub mod segment;
mod types;

pub use catalog::{compare_catalog_rows, CatalogComparator, CATALOG, CATALOG_DELIMITER};
pub use cell::{
    first_on_row, last_on_row, AnyCell, ArrayCell, ArrayField, BufferCell, BufferLayout, Cell,
    CellBuilder, MAX_FAMILY_LENGTH, MAX_ROW_LENGTH,
};
pub use comparator::{
    compare_timestamps, sort_cells, CellComparator, ComparatorKind, StandardComparator, STANDARD,
};
pub use config::{ComparatorConfig, DEFAULT_CATALOG_TABLE};
pub use error::{CellError, CellResult};
pub use segment::{compare_segments, Segment, SegmentSource};
pub use types::{CellType, LATEST_TIMESTAMP, OLDEST_TIMESTAMP};
