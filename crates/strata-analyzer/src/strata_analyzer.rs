//! Strata Analyzer - EXPLAIN plan parsing
//!
//! This crate turns the explain output a backend returns (indented text or
//! nested JSON) into a typed plan tree suitable for visualization.

pub mod explain;

pub use explain::*;
