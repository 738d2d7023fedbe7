//! Execution routing between the embedded engine and the remote proxy.
//!
//! The router is the single choke point every query passes through. It
//! never raises: adapter failures, transport failures, and backend
//! construction failures all come back as a `QueryResult` carrying the
//! error message, so callers handle exactly one shape.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use strata_analyzer::{parse_plan_json, parse_plan_text, PlanNode};
use strata_core::{Cell, QueryBackend, QueryResult};
use strata_drivers::local::LocalBackend;
use strata_drivers::remote::RemoteBackend;

/// Database targeted by remote queries when the caller names none.
pub const DEFAULT_DATABASE: &str = "default";

/// Proxy endpoint used when the caller names none.
pub const DEFAULT_QUERY_ENDPOINT: &str = "/proxy/strata/query";

/// Which backend a query is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// The in-process analytical engine.
    Local,
    /// The server-side database proxy.
    Remote,
}

/// Stateless dispatcher that runs SQL on the selected backend and
/// normalizes every outcome.
///
/// Each call is independent: no retry, no cancellation, no state
/// carried between executions.
#[derive(Debug, Default)]
pub struct ExecutionRouter;

impl ExecutionRouter {
    pub fn new() -> Self {
        Self
    }

    /// Execute `sql` on the backend selected by `mode`.
    ///
    /// `database` and `endpoint` only apply to remote queries; local
    /// queries ignore them. The returned result's `execution_time_ms`
    /// is the router's own end-to-end measurement, replacing whatever
    /// the backend reported.
    #[tracing::instrument(skip(self, sql), fields(mode = ?mode, sql_preview = %sql.chars().take(50).collect::<String>()))]
    pub async fn execute_query(
        &self,
        sql: &str,
        mode: QueryMode,
        database: Option<&str>,
        endpoint: Option<&str>,
    ) -> QueryResult {
        let started = Instant::now();

        match mode {
            QueryMode::Local => match LocalBackend::shared().await {
                Ok(backend) => Self::execute_timed(&backend, sql, started).await,
                Err(e) => {
                    tracing::error!(error = %e, "embedded engine unavailable");
                    QueryResult::failure(e.to_string(), started.elapsed().as_millis() as u64)
                }
            },
            QueryMode::Remote => {
                let endpoint = endpoint.unwrap_or(DEFAULT_QUERY_ENDPOINT);
                let database = database.unwrap_or(DEFAULT_DATABASE);
                match RemoteBackend::new(endpoint, database) {
                    Ok(backend) => Self::execute_timed(&backend, sql, started).await,
                    Err(e) => {
                        tracing::error!(error = %e, "remote backend unavailable");
                        QueryResult::failure(e.to_string(), started.elapsed().as_millis() as u64)
                    }
                }
            }
        }
    }

    /// Run `sql` on an explicit backend, normalizing the outcome.
    pub(crate) async fn execute_with_backend(backend: &dyn QueryBackend, sql: &str) -> QueryResult {
        Self::execute_timed(backend, sql, Instant::now()).await
    }

    async fn execute_timed(
        backend: &dyn QueryBackend,
        sql: &str,
        started: Instant,
    ) -> QueryResult {
        match backend.execute(sql).await {
            Ok(mut result) => {
                result.execution_time_ms = started.elapsed().as_millis() as u64;
                tracing::debug!(
                    backend = backend.name(),
                    row_count = result.row_count,
                    duration_ms = result.execution_time_ms,
                    "query completed"
                );
                result
            }
            Err(e) => {
                let elapsed = started.elapsed().as_millis() as u64;
                tracing::warn!(
                    backend = backend.name(),
                    error = %e,
                    duration_ms = elapsed,
                    "query failed"
                );
                QueryResult::failure(e.to_string(), elapsed)
            }
        }
    }
}

/// Check whether the SQL's leading keyword makes it an explain query.
pub fn is_explain_query(sql: &str) -> bool {
    sql.trim().to_uppercase().starts_with("EXPLAIN")
}

/// Reconstruct a plan tree from an explain query's result.
///
/// Both backends return explain output as ordinary rows whose first
/// column holds the plan, one line per row for the text format or a
/// single serialized document for the JSON format.
pub fn plan_from_result(result: &QueryResult) -> Option<PlanNode> {
    if result.rows.is_empty() {
        return None;
    }

    let text = result
        .rows
        .iter()
        .filter_map(|row| row.first())
        .map(|cell| match cell {
            Cell::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
        if let Some(node) = parse_plan_json(&value) {
            return Some(node);
        }
    }

    parse_plan_text(&text)
}
