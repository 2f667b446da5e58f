//! # cellkey testkit
//!
//! Test utilities for cellkey.
//!
//! This crate provides:
//! - Cell fixtures in both backings
//! - Property-based test generators using proptest
//! - Serializable ordering vectors with expected sort orders
//! - Concurrent comparator stress runs
//!
//! ## Usage
//!
//! ```rust
//! use cellkey_testkit::prelude::*;
//! use cellkey_core::{CellComparator, STANDARD};
//!
//! let (array, buffer) = both_backings(put_builder("r1", "f", "q", 10));
//! assert_eq!(STANDARD.compare(&array, &buffer, false), std::cmp::Ordering::Equal);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
pub use vectors::*;
