//! Remote database-proxy backend for the Strata SQL console
//!
//! Queries are forwarded as JSON to a server-side proxy endpoint which
//! runs them against the remote database and answers with a fully
//! materialized `QueryResult`.

mod backend;
#[cfg(test)]
mod backend_tests;

pub use backend::*;
