//! Query EXPLAIN Parser Module
//!
//! This module provides parsers for the explain-plan representations the
//! console's backends produce:
//! - Indentation-formatted text (default EXPLAIN output)
//! - Nested JSON (EXPLAIN (FORMAT JSON) output)
//!
//! # Example
//!
//! ```
//! use strata_analyzer::explain::parse_plan_text;
//!
//! let text = "Seq Scan on orders  (cost=0.00..10.00 rows=100 width=8)";
//! let node = parse_plan_text(text).unwrap();
//! assert_eq!(node.operator, "Seq Scan");
//! assert_eq!(node.relation.as_deref(), Some("orders"));
//! ```

pub mod json;
pub mod plan;
pub mod text;

pub use json::parse_plan_json;
pub use plan::{PlanNode, PlanNodeIterator};
pub use text::parse_plan_text;
