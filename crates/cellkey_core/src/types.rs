//! Cell type codes and timestamp constants.

use crate::error::CellError;
use std::fmt;

/// Timestamp used for "latest possible version" boundary cells.
pub const LATEST_TIMESTAMP: i64 = i64::MAX;

/// Timestamp used for "oldest possible version" boundary cells.
pub const OLDEST_TIMESTAMP: i64 = i64::MIN;

/// Kind of a cell, stored on the cell as a single type byte.
///
/// Comparators order type bytes in descending numeric order, so delete
/// markers sort ahead of the puts they shadow. `Maximum` and `Minimum`
/// never describe real data; they exist to build boundary cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellType {
    /// Sorts after every other type. Used for last-on-row boundary cells.
    Minimum = 0,
    /// A value.
    Put = 4,
    /// Deletes one version of a column.
    Delete = 8,
    /// Deletes one version of every column in a family.
    DeleteFamilyVersion = 10,
    /// Deletes every version of a column.
    DeleteColumn = 12,
    /// Deletes every column in a family.
    DeleteFamily = 14,
    /// Sorts before every other type. Used for first-on-row boundary cells.
    Maximum = 255,
}

impl CellType {
    /// The stored type byte.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether this type marks a deletion.
    #[must_use]
    pub const fn is_delete(self) -> bool {
        matches!(
            self,
            CellType::Delete
                | CellType::DeleteFamilyVersion
                | CellType::DeleteColumn
                | CellType::DeleteFamily
        )
    }
}

impl TryFrom<u8> for CellType {
    type Error = CellError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CellType::Minimum),
            4 => Ok(CellType::Put),
            8 => Ok(CellType::Delete),
            10 => Ok(CellType::DeleteFamilyVersion),
            12 => Ok(CellType::DeleteColumn),
            14 => Ok(CellType::DeleteFamily),
            255 => Ok(CellType::Maximum),
            code => Err(CellError::UnknownType { code }),
        }
    }
}

impl From<CellType> for u8 {
    fn from(kind: CellType) -> Self {
        kind.code()
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Minimum => "Minimum",
            CellType::Put => "Put",
            CellType::Delete => "Delete",
            CellType::DeleteFamilyVersion => "DeleteFamilyVersion",
            CellType::DeleteColumn => "DeleteColumn",
            CellType::DeleteFamily => "DeleteFamily",
            CellType::Maximum => "Maximum",
        };
        f.write_str(name)
    }
}
