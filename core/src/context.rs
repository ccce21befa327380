//! The execution context for a single cleaning-job run.

use datafusion::execution::context::SessionContext;
use tracing::{info, warn};
use uuid::Uuid;

/// Bookkeeping record returned when a run commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub job_name: String,
    pub run_id: Uuid,
    pub rows_read: u64,
    pub rows_kept: u64,
    pub rows_dropped: u64,
    pub bytes_written: u64,
    pub destination: String,
}

/// `JobContext` is the entry point for one job execution.
///
/// It is a scoped acquisition: `init` starts the run, `commit` consumes the
/// context on the single success path at the end of the pipeline. Every error
/// path drops the context instead, so a run can never be half-committed.
/// It also wraps the DataFusion `SessionContext` the source reader plans and
/// executes against.
pub struct JobContext {
    job_name: String,
    run_id: Uuid,
    session: SessionContext,
    rows_read: u64,
    rows_kept: u64,
    bytes_written: u64,
    destination: Option<String>,
    committed: bool,
}

impl JobContext {
    /// Start a new run under the given job name.
    pub fn init(job_name: impl Into<String>) -> Self {
        let job_name = job_name.into();
        let run_id = Uuid::new_v4();
        info!(job = %job_name, run = %run_id, "job initialized");
        Self {
            job_name,
            run_id,
            session: SessionContext::new(),
            rows_read: 0,
            rows_kept: 0,
            bytes_written: 0,
            destination: None,
            committed: false,
        }
    }

    /// The job name this run was invoked under.
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Unique identifier of this run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The DataFusion session used to materialize the source table.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Record how many rows the source reader materialized.
    pub fn record_read(&mut self, rows: u64) {
        self.rows_read = rows;
    }

    /// Record how many rows survived the filter.
    pub fn record_kept(&mut self, rows: u64) {
        self.rows_kept = rows;
    }

    /// Record the published artifact.
    pub fn record_write(&mut self, bytes: u64, destination: &str) {
        self.bytes_written = bytes;
        self.destination = Some(destination.to_string());
    }

    /// Mark the run committed and return its summary.
    ///
    /// Reachable only after every pipeline stage has succeeded.
    pub fn commit(mut self) -> JobSummary {
        self.committed = true;
        let summary = JobSummary {
            job_name: self.job_name.clone(),
            run_id: self.run_id,
            rows_read: self.rows_read,
            rows_kept: self.rows_kept,
            rows_dropped: self.rows_read.saturating_sub(self.rows_kept),
            bytes_written: self.bytes_written,
            destination: self.destination.clone().unwrap_or_default(),
        };
        info!(
            job = %summary.job_name,
            run = %summary.run_id,
            rows_read = summary.rows_read,
            rows_kept = summary.rows_kept,
            rows_dropped = summary.rows_dropped,
            bytes_written = summary.bytes_written,
            "job committed"
        );
        summary
    }
}

impl Drop for JobContext {
    fn drop(&mut self) {
        if !self.committed {
            warn!(job = %self.job_name, run = %self.run_id, "job run ended without commit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_produces_summary() {
        let mut ctx = JobContext::init("clean-payments");
        assert_eq!(ctx.job_name(), "clean-payments");

        ctx.record_read(10);
        ctx.record_kept(7);
        ctx.record_write(128, "cleaned/output.csv");

        let run_id = ctx.run_id();
        let summary = ctx.commit();
        assert_eq!(summary.job_name, "clean-payments");
        assert_eq!(summary.run_id, run_id);
        assert_eq!(summary.rows_read, 10);
        assert_eq!(summary.rows_kept, 7);
        assert_eq!(summary.rows_dropped, 3);
        assert_eq!(summary.bytes_written, 128);
        assert_eq!(summary.destination, "cleaned/output.csv");
    }

    #[test]
    fn test_uncommitted_context_drops_cleanly() {
        let mut ctx = JobContext::init("abandoned");
        ctx.record_read(5);
        // Dropping without commit must not panic; it only logs a warning.
        drop(ctx);
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = JobContext::init("a");
        let b = JobContext::init("a");
        assert_ne!(a.run_id(), b.run_id());
        a.commit();
        b.commit();
    }
}
