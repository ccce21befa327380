//! Catalog lookup and source materialization.
//!
//! A catalog maps `(database, table)` identifiers to physical table locations
//! and formats. The concrete implementation reads a JSON manifest and
//! materializes tables through DataFusion.

use async_trait::async_trait;
use datafusion::execution::context::SessionContext;
use datafusion::prelude::{CsvReadOptions, ParquetReadOptions};
use serde::{Deserialize, Serialize};
use sift_common::error::{Result, SiftError};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::dataset::Dataset;

/// Physical encoding of a cataloged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Comma-delimited text with a header line.
    Csv,
    Parquet,
}

/// A catalog entry: where a table lives and how it is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub location: String,
    pub format: TableFormat,
}

/// Read-only lookup of cataloged tables.
///
/// Any metadata service satisfying this contract can back the pipeline; the
/// lookup reflects the table contents at read time and has no side effects.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Materialize the current contents of `database`.`table` as a dataset.
    async fn lookup(
        &self,
        session: &SessionContext,
        database: &str,
        table: &str,
    ) -> Result<Dataset>;
}

/// Catalog backed by a JSON manifest file.
///
/// Manifest layout:
///
/// ```json
/// {
///   "databases": {
///     "payments": {
///       "transactions": { "location": "/data/transactions.csv", "format": "csv" }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestCatalog {
    databases: HashMap<String, HashMap<String, TableEntry>>,
}

impl ManifestCatalog {
    /// An empty catalog; tables are added with [`register`](Self::register).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SiftError::configuration_with_source(
                format!("Failed to read catalog manifest '{}'", path.display()),
                e,
            )
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            SiftError::configuration_with_source(
                format!("Failed to parse catalog manifest '{}'", path.display()),
                e,
            )
        })
    }

    /// Add or replace a table entry.
    pub fn register(
        &mut self,
        database: impl Into<String>,
        table: impl Into<String>,
        entry: TableEntry,
    ) {
        self.databases
            .entry(database.into())
            .or_default()
            .insert(table.into(), entry);
    }

    fn entry(&self, database: &str, table: &str) -> Result<&TableEntry> {
        self.databases
            .get(database)
            .and_then(|tables| tables.get(table))
            .ok_or_else(|| {
                SiftError::source_not_found(format!(
                    "table '{}.{}' is not in the catalog",
                    database, table
                ))
            })
    }
}

#[async_trait]
impl Catalog for ManifestCatalog {
    async fn lookup(
        &self,
        session: &SessionContext,
        database: &str,
        table: &str,
    ) -> Result<Dataset> {
        let entry = self.entry(database, table)?;
        debug!(
            database,
            table,
            location = %entry.location,
            "resolved catalog entry"
        );

        // Registration names are per-lookup to keep repeated lookups in one
        // session from colliding.
        let reg_name = format!("src_{}", Uuid::new_v4().simple());
        let open_failed = |e: datafusion::error::DataFusionError| {
            SiftError::source_access_with_source(
                format!(
                    "Failed to open table '{}.{}' at '{}'",
                    database, table, entry.location
                ),
                e,
            )
        };

        match entry.format {
            TableFormat::Csv => {
                let options = CsvReadOptions::new().has_header(true).delimiter(b',');
                session
                    .register_csv(reg_name.as_str(), &entry.location, options)
                    .await
                    .map_err(open_failed)?;
            }
            TableFormat::Parquet => {
                session
                    .register_parquet(reg_name.as_str(), &entry.location, ParquetReadOptions::default())
                    .await
                    .map_err(open_failed)?;
            }
        }

        let df = session
            .table(reg_name.as_str())
            .await
            .map_err(open_failed)?;
        let schema = df.schema().inner().clone();
        let batches = df.collect().await.map_err(|e| {
            SiftError::source_access_with_source(
                format!(
                    "Failed to read table '{}.{}' at '{}'",
                    database, table, entry.location
                ),
                e,
            )
        })?;

        session.deregister_table(reg_name.as_str()).map_err(|e| {
            SiftError::internal_with_source("Failed to drop temporary table registration", e)
        })?;

        Dataset::try_new(schema, batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").expect("temp file");
        write!(file, "{}", contents).expect("write fixture");
        file
    }

    fn catalog_with(location: &str, format: TableFormat) -> ManifestCatalog {
        let mut catalog = ManifestCatalog::new();
        catalog.register(
            "payments",
            "transactions",
            TableEntry {
                location: location.to_string(),
                format,
            },
        );
        catalog
    }

    #[test]
    fn test_manifest_parsing() {
        let manifest = r#"
        {
            "databases": {
                "payments": {
                    "transactions": { "location": "/data/tx.csv", "format": "csv" },
                    "merchants": { "location": "/data/m.parquet", "format": "parquet" }
                }
            }
        }"#;
        let catalog: ManifestCatalog = serde_json::from_str(manifest).expect("parse manifest");

        let entry = catalog.entry("payments", "transactions").expect("entry");
        assert_eq!(entry.location, "/data/tx.csv");
        assert_eq!(entry.format, TableFormat::Csv);

        let entry = catalog.entry("payments", "merchants").expect("entry");
        assert_eq!(entry.format, TableFormat::Parquet);
    }

    #[tokio::test]
    async fn test_lookup_of_unknown_table_is_source_not_found() {
        let catalog = ManifestCatalog::new();
        let session = SessionContext::new();

        let result = catalog.lookup(&session, "payments", "transactions").await;
        assert!(matches!(result, Err(SiftError::SourceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_lookup_materializes_csv_table() {
        let file = csv_fixture("id,amount\n1,10\n2,20\n3,30\n");
        let catalog = catalog_with(&file.path().to_string_lossy(), TableFormat::Csv);
        let session = SessionContext::new();

        let dataset = catalog
            .lookup(&session, "payments", "transactions")
            .await
            .expect("lookup");
        assert_eq!(dataset.num_rows(), 3);
        assert_eq!(dataset.num_columns(), 2);
        assert_eq!(dataset.schema().field(0).name(), "id");
        assert_eq!(dataset.schema().field(1).name(), "amount");
    }

    #[tokio::test]
    async fn test_lookup_of_unreadable_location_is_source_access() {
        let catalog = catalog_with("/definitely/not/here.csv", TableFormat::Csv);
        let session = SessionContext::new();

        let result = catalog.lookup(&session, "payments", "transactions").await;
        assert!(matches!(result, Err(SiftError::SourceAccess { .. })));
    }

    #[tokio::test]
    async fn test_repeated_lookup_in_one_session() {
        let file = csv_fixture("id\n1\n");
        let catalog = catalog_with(&file.path().to_string_lossy(), TableFormat::Csv);
        let session = SessionContext::new();

        let first = catalog
            .lookup(&session, "payments", "transactions")
            .await
            .expect("first lookup");
        let second = catalog
            .lookup(&session, "payments", "transactions")
            .await
            .expect("second lookup");
        assert_eq!(first.num_rows(), second.num_rows());
    }
}
