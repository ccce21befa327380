//! Job configuration loading.

use serde::{Deserialize, Serialize};
use sift_common::error::{Result, SiftError};
use sift_common::storage::StorageBackend;
use std::path::{Path, PathBuf};

/// Identifier of a cataloged source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub database: String,
    pub table: String,
}

/// Configuration for one cleaning job.
///
/// The job name is deliberately not part of the file: it is the single
/// required invocation parameter and arrives on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Path to the catalog manifest.
    pub catalog: PathBuf,
    /// Source table to clean.
    pub source: SourceRef,
    /// Object path of the output artifact inside the destination store.
    pub destination: String,
    /// Destination storage backend.
    pub storage: StorageBackend,
}

impl JobConfig {
    /// Load a configuration file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SiftError::configuration_with_source(
                format!("Failed to read job config '{}'", path.display()),
                e,
            )
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            SiftError::configuration_with_source(
                format!("Failed to parse job config '{}'", path.display()),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_parsing() {
        let raw = r#"
        {
            "catalog": "/etc/sift/catalog.json",
            "source": { "database": "payments", "table": "transactions" },
            "destination": "cleaned/transactions.csv",
            "storage": { "type": "local_file_system", "root_path": "/data/out" }
        }"#;

        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{}", raw).expect("write config");

        let config = JobConfig::from_file(file.path()).expect("load config");
        assert_eq!(config.catalog, PathBuf::from("/etc/sift/catalog.json"));
        assert_eq!(config.source.database, "payments");
        assert_eq!(config.source.table, "transactions");
        assert_eq!(config.destination, "cleaned/transactions.csv");
        assert!(matches!(
            config.storage,
            StorageBackend::LocalFileSystem { .. }
        ));
    }

    #[test]
    fn test_missing_field_is_configuration_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "destination": "out.csv" }}"#).expect("write config");

        let result = JobConfig::from_file(file.path());
        assert!(matches!(result, Err(SiftError::Configuration { .. })));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let result = JobConfig::from_file(Path::new("/no/such/config.json"));
        assert!(matches!(result, Err(SiftError::Configuration { .. })));
    }
}
