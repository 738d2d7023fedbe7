//! Embedded DuckDB backend for the Strata SQL console
//!
//! DuckDB is an in-process analytical database management system.
//! This crate hosts a single shared engine per process and exposes it
//! through the `QueryBackend` trait so the execution router can treat
//! it like any other target.

mod engine;
#[cfg(test)]
mod engine_tests;

pub use engine::*;
