//! Error types for cell construction and comparator configuration.
//!
//! Comparisons themselves never fail. These errors only surface from the
//! checked constructors and from configuration validation.

use thiserror::Error;

/// Result type for cell operations.
pub type CellResult<T> = Result<T, CellError>;

/// Errors that can occur while building cells or configuring comparators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    /// A segment does not fit inside its byte source.
    #[error("segment out of bounds: offset {offset}, len {len}, source length {source_len}")]
    SegmentOutOfBounds {
        /// Requested start offset (or buffer position).
        offset: usize,
        /// Requested segment length.
        len: usize,
        /// Length of the backing array or buffer.
        source_len: usize,
    },

    /// A key field is longer than the engine allows.
    #[error("{field} too long: {len} bytes (max {max})")]
    FieldTooLong {
        /// Which field overflowed.
        field: &'static str,
        /// Actual length.
        len: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// A type byte that does not name a known cell type.
    #[error("unknown cell type code: {code}")]
    UnknownType {
        /// The unrecognized code.
        code: u8,
    },

    /// A catalog table name was empty.
    #[error("catalog table name must not be empty")]
    EmptyTableName,
}

impl CellError {
    /// Create a segment out-of-bounds error.
    pub fn out_of_bounds(offset: usize, len: usize, source_len: usize) -> Self {
        Self::SegmentOutOfBounds {
            offset,
            len,
            source_len,
        }
    }

    /// Create a field-too-long error.
    pub fn field_too_long(field: &'static str, len: usize, max: usize) -> Self {
        Self::FieldTooLong { field, len, max }
    }
}
