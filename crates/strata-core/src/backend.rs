//! Query backend trait definition

use crate::{QueryResult, Result};
use async_trait::async_trait;

/// A query execution backend.
///
/// Implementations run SQL against one concrete engine (the embedded local
/// engine, or the remote database proxy) and translate the native output into
/// a `QueryResult`. Backends are allowed to fail with `Err`; the execution
/// router is the single place where failures are normalized into
/// `QueryResult.error`, so callers above the router never see an `Err`.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Short identifier for logging (e.g., "duckdb", "remote")
    fn name(&self) -> &'static str;

    /// Execute SQL and return the normalized result.
    ///
    /// Backends may fill in `execution_time_ms` from their own clock, but the
    /// router overwrites it with an end-to-end measurement so timings stay
    /// comparable across backends.
    async fn execute(&self, sql: &str) -> Result<QueryResult>;
}
