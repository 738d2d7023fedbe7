//! Core types for Strata

use serde::{Deserialize, Serialize};

/// A single result cell: the closed set of JSON-representable scalars.
///
/// Serialized untagged so the wire shape is the scalar itself, which is what
/// the database proxy sends back in `QueryResult.rows`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Numeric value (JSON number semantics)
    Number(f64),
    /// UTF-8 string
    String(String),
}

impl Cell {
    /// Check if the cell is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => write!(f, "NULL"),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => Cell::String(s),
            None => Cell::Null,
        }
    }
}

/// Column metadata in a query result.
///
/// `data_type` is an opaque descriptive label from whichever backend produced
/// the result; it is never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryColumn {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

impl QueryColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
        }
    }
}

/// Request body for the database-proxy query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Result of a SQL query execution.
///
/// Both backends normalize into this shape; it doubles as the wire format of
/// the remote proxy's response. Cells are index-aligned with `columns`.
/// A result is created fresh per execution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<QueryColumn>,
    pub rows: Vec<Vec<Cell>>,
    /// Logical row count. Remote backends may report a count independent of
    /// the materialized rows; the local backend always reports an exact count.
    pub row_count: u64,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    /// Create a successful empty result, for "no result yet" states.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            execution_time_ms: 0,
            error: None,
        }
    }

    /// Create a failed result carrying the elapsed time up to the failure.
    pub fn failure(message: impl Into<String>, execution_time_ms: u64) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            execution_time_ms,
            error: Some(message.into()),
        }
    }

    /// Check if the query was successful (no error).
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the result has rows
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}
