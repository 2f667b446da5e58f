//! Comparator selection configuration.

use crate::comparator::{CellComparator, ComparatorKind};
use crate::error::{CellError, CellResult};

/// Name of the catalog table in a default deployment.
pub const DEFAULT_CATALOG_TABLE: &str = "hbase:meta";

/// Decides which comparator a table's cells are ordered with.
///
/// Picking the wrong comparator is not detectable from the cells
/// themselves: both accept the same shape and both yield a valid total
/// order, just a different one. Route every table lookup through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorConfig {
    /// Tables whose rows use the three-part catalog layout.
    pub catalog_tables: Vec<String>,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            catalog_tables: vec![DEFAULT_CATALOG_TABLE.to_string()],
        }
    }
}

impl ComparatorConfig {
    /// Creates a configuration with the default catalog table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table that uses catalog row ordering.
    #[must_use]
    pub fn catalog_table(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.catalog_tables.contains(&name) {
            self.catalog_tables.push(name);
        }
        self
    }

    /// Replaces the catalog table list.
    #[must_use]
    pub fn catalog_tables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog_tables = names.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that every catalog table name is non-empty.
    pub fn validate(&self) -> CellResult<()> {
        if self.catalog_tables.iter().any(String::is_empty) {
            return Err(CellError::EmptyTableName);
        }
        Ok(())
    }

    /// Whether `table` uses catalog row ordering.
    #[must_use]
    pub fn is_catalog(&self, table: &str) -> bool {
        self.catalog_tables.iter().any(|name| name == table)
    }

    /// The comparator kind for `table`.
    #[must_use]
    pub fn kind_for(&self, table: &str) -> ComparatorKind {
        if self.is_catalog(table) {
            ComparatorKind::Catalog
        } else {
            ComparatorKind::Standard
        }
    }

    /// The shared comparator for `table`.
    #[must_use]
    pub fn comparator_for(&self, table: &str) -> &'static dyn CellComparator {
        let kind = self.kind_for(table);
        tracing::debug!(table, %kind, "resolved cell comparator");
        kind.comparator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes_catalog_table() {
        let config = ComparatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.kind_for(DEFAULT_CATALOG_TABLE), ComparatorKind::Catalog);
        assert_eq!(config.kind_for("users"), ComparatorKind::Standard);
        assert_eq!(
            config.comparator_for("hbase:meta").kind(),
            ComparatorKind::Catalog
        );
    }

    #[test]
    fn extra_catalog_tables() {
        let config = ComparatorConfig::new()
            .catalog_table("ns:regions")
            .catalog_table("ns:regions");
        assert_eq!(config.catalog_tables.len(), 2);
        assert!(config.is_catalog("ns:regions"));
        assert!(config.is_catalog(DEFAULT_CATALOG_TABLE));
    }

    #[test]
    fn replacing_the_list_drops_the_default() {
        let config = ComparatorConfig::new().catalog_tables(["meta"]);
        assert!(!config.is_catalog(DEFAULT_CATALOG_TABLE));
        assert_eq!(config.comparator_for("meta").kind(), ComparatorKind::Catalog);
    }

    #[test]
    fn empty_name_is_invalid() {
        let config = ComparatorConfig::new().catalog_table("");
        assert_eq!(config.validate(), Err(CellError::EmptyTableName));
    }
}
