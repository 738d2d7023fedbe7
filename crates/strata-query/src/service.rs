//! Query execution service
//!
//! Wraps the execution router with history tracking, plan extraction
//! for explain queries, and a named saved-query store.

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use strata_analyzer::PlanNode;
use strata_core::QueryResult;

use crate::error::{QueryServiceError, QueryServiceResult};
use crate::history::{QueryHistory, QueryHistoryEntry, SavedQuery};
use crate::router::{is_explain_query, plan_from_result, ExecutionRouter, QueryMode};

/// One executed query: the normalized result plus, for explain
/// queries, the reconstructed plan tree.
#[derive(Debug, Clone)]
pub struct QueryExecution {
    pub result: QueryResult,
    pub plan: Option<PlanNode>,
}

/// Service for executing queries with automatic bookkeeping
///
/// Every execution goes through the router, so the service inherits
/// its guarantee: callers always get a result, never an error.
pub struct QueryService {
    router: ExecutionRouter,
    history: Arc<RwLock<QueryHistory>>,
    saved: Arc<RwLock<Vec<SavedQuery>>>,
}

impl QueryService {
    /// Create a new query service with a default internal history
    pub fn new() -> Self {
        Self::with_shared_history(Arc::new(RwLock::new(QueryHistory::default())))
    }

    /// Create a query service with a shared history instance
    ///
    /// This allows multiple components to share the same query history.
    pub fn with_shared_history(history: Arc<RwLock<QueryHistory>>) -> Self {
        Self {
            router: ExecutionRouter::new(),
            history,
            saved: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Execute a query, record it in history, and attach the plan tree
    /// when the SQL is an explain query.
    #[tracing::instrument(skip(self, sql), fields(mode = ?mode, sql_preview = %sql.chars().take(50).collect::<String>()))]
    pub async fn execute(
        &self,
        sql: &str,
        mode: QueryMode,
        database: Option<&str>,
        endpoint: Option<&str>,
    ) -> QueryExecution {
        let result = self.router.execute_query(sql, mode, database, endpoint).await;

        let entry = match &result.error {
            None => QueryHistoryEntry::success(
                sql.to_string(),
                database.map(str::to_string),
                result.execution_time_ms,
                result.row_count,
            ),
            Some(error) => QueryHistoryEntry::failure(
                sql.to_string(),
                database.map(str::to_string),
                result.execution_time_ms,
                error.clone(),
            ),
        };
        self.history.write().add(entry);

        let plan = if result.is_ok() && is_explain_query(sql) {
            plan_from_result(&result)
        } else {
            None
        };

        QueryExecution { result, plan }
    }

    /// The shared history handle.
    pub fn history(&self) -> Arc<RwLock<QueryHistory>> {
        self.history.clone()
    }

    /// Keep a query under a unique name.
    pub fn save_query(
        &self,
        name: &str,
        sql: &str,
        database: Option<String>,
    ) -> QueryServiceResult<SavedQuery> {
        let mut saved = self.saved.write();
        if saved.iter().any(|q| q.name == name) {
            return Err(QueryServiceError::DuplicateSavedQuery(name.to_string()));
        }

        let query = SavedQuery::new(name, sql, database);
        tracing::debug!(saved_query_id = %query.id, name, "saved query");
        saved.push(query.clone());
        Ok(query)
    }

    /// Snapshot of all saved queries.
    pub fn saved_queries(&self) -> Vec<SavedQuery> {
        self.saved.read().clone()
    }

    /// Replace the SQL of a saved query.
    pub fn update_saved_query(&self, id: Uuid, sql: &str) -> QueryServiceResult<()> {
        let mut saved = self.saved.write();
        let query = saved
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(QueryServiceError::SavedQueryNotFound(id))?;
        query.update_sql(sql);
        Ok(())
    }

    /// Remove a saved query. Returns whether anything was removed.
    pub fn delete_saved_query(&self, id: Uuid) -> bool {
        let mut saved = self.saved.write();
        let before = saved.len();
        saved.retain(|q| q.id != id);
        saved.len() != before
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_execute_records_success_in_history() {
        let service = QueryService::new();
        let execution = service
            .execute("SELECT 1 AS one", QueryMode::Local, None, None)
            .await;

        assert!(execution.result.is_ok());
        assert!(execution.plan.is_none());

        let history = service.history();
        let history = history.read();
        assert_eq!(history.len(), 1);
        let entry = history.entries().next().unwrap();
        assert!(entry.success);
        assert_eq!(entry.row_count, Some(1));
    }

    #[tokio::test]
    async fn test_execute_records_failure_in_history() {
        let service = QueryService::new();
        let execution = service
            .execute("SELEKT broken", QueryMode::Local, None, None)
            .await;

        assert!(!execution.result.is_ok());

        let history = service.history();
        let history = history.read();
        let entry = history.entries().next().unwrap();
        assert!(!entry.success);
        assert!(entry.error.is_some());
        assert_eq!(entry.row_count, None);
    }

    #[tokio::test]
    async fn test_explain_query_attaches_plan() {
        let service = QueryService::new();
        let execution = service
            .execute("EXPLAIN SELECT 1", QueryMode::Local, None, None)
            .await;

        assert!(execution.result.is_ok());
        assert!(execution.plan.is_some());
    }

    #[tokio::test]
    async fn test_shared_history_is_visible_to_all_holders() {
        let history = Arc::new(RwLock::new(QueryHistory::new(10)));
        let service = QueryService::with_shared_history(history.clone());

        service
            .execute("SELECT 1 AS one", QueryMode::Local, None, None)
            .await;

        assert_eq!(history.read().len(), 1);
    }

    #[test]
    fn test_saved_query_names_are_unique() {
        let service = QueryService::new();
        service.save_query("daily", "SELECT 1", None).unwrap();

        let err = service.save_query("daily", "SELECT 2", None).unwrap_err();
        assert!(matches!(err, QueryServiceError::DuplicateSavedQuery(_)));
        assert_eq!(service.saved_queries().len(), 1);
    }

    #[test]
    fn test_saved_query_update_and_delete() {
        let service = QueryService::new();
        let saved = service.save_query("daily", "SELECT 1", None).unwrap();

        service.update_saved_query(saved.id, "SELECT 2").unwrap();
        assert_eq!(service.saved_queries()[0].sql, "SELECT 2");

        assert!(service.delete_saved_query(saved.id));
        assert!(!service.delete_saved_query(saved.id));
        assert!(service.saved_queries().is_empty());

        let err = service
            .update_saved_query(saved.id, "SELECT 3")
            .unwrap_err();
        assert!(matches!(err, QueryServiceError::SavedQueryNotFound(_)));
    }
}
