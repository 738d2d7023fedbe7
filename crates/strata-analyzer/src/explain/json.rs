//! JSON-format EXPLAIN parser
//!
//! Parses EXPLAIN (FORMAT JSON) output: an array whose first element carries
//! a nested `Plan` object, children under `Plans`. JSON typing is explicit,
//! so an absent field means "not reported" and simply takes the model's
//! neutral value; there is no malformed-number leniency to apply here.

use crate::explain::plan::PlanNode;
use serde_json::Value;

/// Fields mapped onto dedicated `PlanNode` fields; everything else a plan
/// object carries is preserved into `extra`.
const KNOWN_KEYS: &[&str] = &[
    "Node Type",
    "Relation Name",
    "Startup Cost",
    "Total Cost",
    "Plan Rows",
    "Actual Rows",
    "Actual Total Time",
    "Plan Width",
    "Plans",
];

/// Parse EXPLAIN (FORMAT JSON) output into a plan tree.
///
/// Returns `None` when the value is not an array, the array is empty, or the
/// first element has no `Plan` object.
pub fn parse_plan_json(json: &Value) -> Option<PlanNode> {
    let plan = json.as_array()?.first()?.get("Plan")?;
    from_json_plan(plan)
}

/// Map one plan object (and its `Plans` children) onto a `PlanNode`.
///
/// A plan object without a `Node Type` yields `None`; a node must have an
/// operator to exist.
fn from_json_plan(plan: &Value) -> Option<PlanNode> {
    let operator = plan.get("Node Type")?.as_str()?.to_string();

    let children = plan
        .get("Plans")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(from_json_plan).collect())
        .unwrap_or_default();

    let mut extra = Vec::new();
    if let Some(obj) = plan.as_object() {
        for (key, value) in obj {
            if KNOWN_KEYS.contains(&key.as_str()) {
                continue;
            }
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            extra.push((key.clone(), rendered));
        }
    }

    Some(PlanNode {
        operator,
        relation: plan
            .get("Relation Name")
            .and_then(|v| v.as_str())
            .map(String::from),
        cost_startup: plan
            .get("Startup Cost")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        cost_total: plan
            .get("Total Cost")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        estimated_rows: plan.get("Plan Rows").and_then(|v| v.as_u64()).unwrap_or(0),
        actual_rows: plan.get("Actual Rows").and_then(|v| v.as_u64()),
        actual_time_ms: plan.get("Actual Total Time").and_then(|v| v.as_f64()),
        width: plan.get("Plan Width").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
        children,
        extra,
    })
}
