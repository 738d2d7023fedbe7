//! Strata Query - query execution routing and history
//!
//! This crate decides where a query runs (the embedded engine or the
//! remote database proxy), normalizes every outcome into the shared
//! result shape, and keeps a capped history of what was executed.

mod error;
mod history;
mod router;
mod service;

pub use error::{QueryServiceError, QueryServiceResult};
pub use history::{QueryHistory, QueryHistoryEntry, SavedQuery};
pub use router::{
    is_explain_query, plan_from_result, ExecutionRouter, QueryMode, DEFAULT_DATABASE,
    DEFAULT_QUERY_ENDPOINT,
};
pub use service::{QueryExecution, QueryService};
