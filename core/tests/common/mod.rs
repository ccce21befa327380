//! Shared helpers for pipeline integration tests.

use sift_common::storage::StorageBackend;
use sift_core::config::{JobConfig, SourceRef};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Install the test log subscriber, ignoring repeat installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

/// Write a source CSV file under `dir`.
pub fn write_source_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("source.csv");
    std::fs::write(&path, contents).expect("write source csv");
    path
}

/// Write a single-table catalog manifest under `dir`.
pub fn write_manifest(dir: &Path, database: &str, table: &str, location: &Path) -> PathBuf {
    let manifest = serde_json::json!({
        "databases": {
            database: {
                table: {
                    "location": location.to_string_lossy(),
                    "format": "csv"
                }
            }
        }
    });
    let path = dir.join("catalog.json");
    std::fs::write(&path, manifest.to_string()).expect("write manifest");
    path
}

/// A ready-to-run pipeline rooted in a temp directory.
pub struct PipelineFixture {
    #[allow(dead_code)] // Keeps the temp directory alive for the test's duration
    workdir: TempDir,
    pub out_root: PathBuf,
    pub config: JobConfig,
}

/// Build a fixture whose catalog holds one CSV table with the given contents.
pub fn fixture_with_source(csv: &str) -> PipelineFixture {
    init_tracing();
    let workdir = TempDir::new().expect("workdir");
    let source = write_source_csv(workdir.path(), csv);
    let catalog = write_manifest(workdir.path(), "payments", "transactions", &source);
    let out_root = workdir.path().join("out");

    let config = JobConfig {
        catalog,
        source: SourceRef {
            database: "payments".to_string(),
            table: "transactions".to_string(),
        },
        destination: "cleaned/output.csv".to_string(),
        storage: StorageBackend::LocalFileSystem {
            root_path: out_root.to_string_lossy().to_string(),
        },
    };

    PipelineFixture {
        workdir,
        out_root,
        config,
    }
}

/// Read the published output artifact back from the destination store.
pub fn read_output(fixture: &PipelineFixture) -> String {
    std::fs::read_to_string(fixture.out_root.join(&fixture.config.destination))
        .expect("read output artifact")
}
