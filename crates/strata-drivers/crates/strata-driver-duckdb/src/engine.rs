//! In-process DuckDB engine and its backend adapter.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use strata_core::{Cell, QueryBackend, QueryColumn, QueryResult, Result, StrataError};
use tokio::sync::Mutex as AsyncMutex;

/// Analytical engine backed by a single DuckDB database.
///
/// The underlying connection is not thread-safe, so each statement
/// takes the connection lock for its full lifetime. Dropping the
/// engine closes the database and releases its memory.
pub struct LocalEngine {
    connection: Mutex<duckdb::Connection>,
    path: String,
}

impl LocalEngine {
    /// Open a transient in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection = duckdb::Connection::open_in_memory()
            .map_err(|e| StrataError::Engine(format!("Open failed: {}", e)))?;
        Ok(Self {
            connection: Mutex::new(connection),
            path: ":memory:".to_string(),
        })
    }

    /// Open (or create) a database file at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let connection = duckdb::Connection::open(path)
            .map_err(|e| StrataError::Engine(format!("Open failed: {}", e)))?;
        Ok(Self {
            connection: Mutex::new(connection),
            path: path.to_string(),
        })
    }

    /// Get the database path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Run one statement and collect the complete result set.
    pub fn run(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let conn = self
            .connection
            .lock()
            .map_err(|e| StrataError::Engine(format!("Lock poisoned: {}", e)))?;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StrataError::Engine(format!("Prepare failed: {}", e)))?;

        // Execute first, then read column info off the result set
        let mut native_rows = stmt
            .query([])
            .map_err(|e| StrataError::Query(format!("Query failed: {}", e)))?;

        let column_names: Vec<String> = native_rows
            .as_ref()
            .map(|r| r.column_names().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default();
        let column_count = column_names.len();

        let columns: Vec<QueryColumn> = column_names
            .iter()
            .map(|name| QueryColumn::new(name.clone(), "TEXT", true)) // DuckDB doesn't expose declared types here
            .collect();

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        while let Some(row) = native_rows
            .next()
            .map_err(|e| StrataError::Query(format!("Row fetch failed: {}", e)))?
        {
            let mut cells = Vec::with_capacity(column_count);
            for i in 0..column_count {
                cells.push(cell_from_row(row, i));
            }
            rows.push(cells);
        }

        let execution_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            row_count = rows.len(),
            duration_ms = execution_time_ms,
            "query completed"
        );

        let row_count = rows.len() as u64;
        Ok(QueryResult {
            columns,
            rows,
            row_count,
            execution_time_ms,
            error: None,
        })
    }
}

static SHARED_ENGINE: AsyncMutex<Option<Arc<LocalEngine>>> = AsyncMutex::const_new(None);

/// Return the process-wide engine, creating it on first use.
///
/// Callers racing during startup all wait on the same lock, so exactly
/// one engine is ever constructed.
pub async fn shared_engine() -> Result<Arc<LocalEngine>> {
    let mut guard = SHARED_ENGINE.lock().await;
    if let Some(engine) = guard.as_ref() {
        return Ok(engine.clone());
    }

    tracing::info!("initializing embedded engine");
    let engine = Arc::new(LocalEngine::open_in_memory()?);
    *guard = Some(engine.clone());
    Ok(engine)
}

/// Tear down the process-wide engine. The next `shared_engine` call
/// builds a fresh one.
pub async fn shutdown_shared_engine() {
    let mut guard = SHARED_ENGINE.lock().await;
    if guard.take().is_some() {
        tracing::info!("embedded engine shut down");
    }
}

/// Query backend that executes against an embedded engine.
pub struct LocalBackend {
    engine: Arc<LocalEngine>,
}

impl LocalBackend {
    /// Backend bound to a specific engine.
    pub fn new(engine: Arc<LocalEngine>) -> Self {
        Self { engine }
    }

    /// Backend bound to the process-wide shared engine.
    pub async fn shared() -> Result<Self> {
        Ok(Self::new(shared_engine().await?))
    }
}

#[async_trait]
impl QueryBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    async fn execute(&self, sql: &str) -> Result<QueryResult> {
        self.engine.run(sql)
    }
}

/// Convert one column of a DuckDB row to a `Cell`, trying the native
/// types in descending order of likelihood.
fn cell_from_row(row: &duckdb::Row<'_>, idx: usize) -> Cell {
    if let Ok(v) = row.get::<_, Option<i64>>(idx) {
        return match v {
            Some(n) => Cell::Number(n as f64),
            None => Cell::Null,
        };
    }
    if let Ok(v) = row.get::<_, Option<f64>>(idx) {
        return match v {
            Some(n) => Cell::Number(n),
            None => Cell::Null,
        };
    }
    if let Ok(v) = row.get::<_, Option<String>>(idx) {
        return match v {
            Some(s) => Cell::String(s),
            None => Cell::Null,
        };
    }
    if let Ok(v) = row.get::<_, Option<bool>>(idx) {
        return match v {
            Some(b) => Cell::Bool(b),
            None => Cell::Null,
        };
    }
    Cell::Null
}
