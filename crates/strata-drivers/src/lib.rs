//! Strata Drivers - execution backend implementations
//!
//! This crate gathers the concrete implementations of the `QueryBackend`
//! trait defined in `strata-core`.

// Embedded analytical engine
#[cfg(feature = "local")]
pub use strata_driver_duckdb as local;

// Server-side database proxy
#[cfg(feature = "remote")]
pub use strata_driver_remote as remote;

/// Re-export commonly used types from strata-core
pub use strata_core::{
    Cell, QueryBackend, QueryColumn, QueryRequest, QueryResult, Result, StrataError,
};
