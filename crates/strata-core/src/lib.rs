//! Strata Core - shared types and backend abstractions for the SQL console
//!
//! This crate provides the fundamental types the rest of Strata depends on:
//!
//! - `QueryBackend` - Trait for query execution backends
//! - `QueryResult` / `QueryColumn` / `Cell` - The normalized result shape
//! - `QueryRequest` - Wire request body for the database proxy
//! - `StrataError` - Common error type

mod backend;
mod error;
mod types;

pub use backend::*;
pub use error::*;
pub use types::*;
