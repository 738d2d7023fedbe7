//! Query history and saved queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// A single query history entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryHistoryEntry {
    /// Unique identifier
    pub id: Uuid,

    /// The SQL query
    pub sql: String,

    /// Database this was run against, if any
    pub database: Option<String>,

    /// When the query was executed
    pub executed_at: DateTime<Utc>,

    /// Execution duration in milliseconds
    pub execution_time_ms: u64,

    /// Number of rows returned
    pub row_count: Option<u64>,

    /// Error message if failed
    pub error: Option<String>,

    /// Whether the query succeeded
    pub success: bool,
}

impl QueryHistoryEntry {
    /// Create a successful history entry
    pub fn success(
        sql: String,
        database: Option<String>,
        execution_time_ms: u64,
        row_count: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sql,
            database,
            executed_at: Utc::now(),
            execution_time_ms,
            row_count: Some(row_count),
            error: None,
            success: true,
        }
    }

    /// Create a failed history entry
    pub fn failure(
        sql: String,
        database: Option<String>,
        execution_time_ms: u64,
        error: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sql,
            database,
            executed_at: Utc::now(),
            execution_time_ms,
            row_count: None,
            error: Some(error),
            success: false,
        }
    }
}

/// A query kept by name for later reuse
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: Uuid,
    pub name: String,
    pub sql: String,
    pub database: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedQuery {
    pub fn new(name: impl Into<String>, sql: impl Into<String>, database: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sql: sql.into(),
            database,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the SQL text, bumping the update timestamp.
    pub fn update_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
        self.updated_at = Utc::now();
    }
}

/// Query history manager
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryHistory {
    /// History entries (most recent first)
    entries: VecDeque<QueryHistoryEntry>,

    /// Maximum entries to keep
    max_entries: usize,
}

impl QueryHistory {
    /// Create a new query history
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Add an entry to history
    pub fn add(&mut self, entry: QueryHistoryEntry) {
        tracing::debug!(
            query_id = %entry.id,
            success = entry.success,
            duration_ms = entry.execution_time_ms,
            "adding query to history"
        );
        self.entries.push_front(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// Get all entries
    pub fn entries(&self) -> impl Iterator<Item = &QueryHistoryEntry> {
        self.entries.iter()
    }

    /// Get entries for a specific database
    pub fn for_database<'a>(
        &'a self,
        database: &'a str,
    ) -> impl Iterator<Item = &'a QueryHistoryEntry> {
        self.entries
            .iter()
            .filter(move |e| e.database.as_deref() == Some(database))
    }

    /// Search history by SQL content
    pub fn search(&self, query: &str) -> impl Iterator<Item = &QueryHistoryEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.sql.to_lowercase().contains(&query_lower))
    }

    /// Clear all history
    pub fn clear(&mut self) {
        let count = self.entries.len();
        tracing::info!(entries_cleared = count, "clearing query history");
        self.entries.clear();
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new(1000)
    }
}
