//! Text-format EXPLAIN parser
//!
//! Parses indentation-formatted explain output where each line is one
//! operator description and nesting is encoded purely by leading whitespace:
//!
//! ```text
//! Hash Join  (cost=0.00..100.00 rows=50 width=20)
//!   -> Seq Scan on orders  (cost=0.00..10.00 rows=100 width=8)
//!   -> Hash  (cost=0.00..5.00 rows=10 width=12)
//! ```
//!
//! The parser is deliberately lenient: malformed numeric sub-fields default
//! to zero instead of failing the parse. The only way to get `None` back is
//! input with no usable lines at all.

use crate::explain::plan::PlanNode;

/// Child-marker prefix used by text-format plans.
const CHILD_MARKER: &str = "-> ";

/// Parse EXPLAIN text format into a plan tree.
///
/// Returns `None` for empty input (including input that is nothing but blank
/// lines). The first line's indentation defines the root.
pub fn parse_plan_text(explain_text: &str) -> Option<PlanNode> {
    let lines: Vec<&str> = explain_text.lines().collect();
    if lines.is_empty() || lines.iter().all(|l| l.trim().is_empty()) {
        tracing::trace!("empty explain text, no plan");
        return None;
    }
    parse_lines(&lines, 0).map(|(node, _)| node)
}

/// Parse the node starting at `start` together with its whole subtree.
///
/// Returns the node and the index of the first line past its subtree. Lines
/// indented at or below the node's own indentation are left for the caller;
/// they belong to an ancestor or a sibling.
fn parse_lines(lines: &[&str], start: usize) -> Option<(PlanNode, usize)> {
    if start >= lines.len() {
        return None;
    }
    let line = lines[start];
    let indent = indent_of(line);
    let trimmed = line.trim().trim_start_matches(CHILD_MARKER);

    let mut node = parse_operator_line(trimmed);

    let mut idx = start + 1;
    while idx < lines.len() {
        let next_indent = indent_of(lines[idx]);
        if next_indent <= indent {
            break;
        }
        if let Some((child, consumed)) = parse_lines(lines, idx) {
            node.children.push(child);
            idx = consumed;
        } else {
            idx += 1;
        }
    }

    Some((node, idx))
}

/// Parse a single operator line into a childless node.
///
/// The segment before the `(cost=` annotation is the head; a ` on ` marker in
/// the head splits it into operator and relation. Inside the annotation the
/// `cost=`, `rows=` and `width=` fields are scanned order-independently, each
/// defaulting to zero when absent or malformed.
fn parse_operator_line(line: &str) -> PlanNode {
    let mut node = PlanNode::new(line);

    let paren_start = match line.find("(cost=") {
        Some(idx) => idx,
        None => return node,
    };

    let head = line[..paren_start].trim();
    if let Some(on_idx) = head.find(" on ") {
        node.operator = head[..on_idx].to_string();
        node.relation = Some(head[on_idx + 4..].trim().to_string());
    } else {
        node.operator = head.to_string();
    }

    for part in line[paren_start..].split_whitespace() {
        let part = part.trim_start_matches('(').trim_end_matches(')');
        if let Some(range) = part.strip_prefix("cost=") {
            let nums: Vec<&str> = range.split("..").collect();
            if nums.len() == 2 {
                node.cost_startup = nums[0].parse().unwrap_or(0.0);
                node.cost_total = nums[1].parse().unwrap_or(0.0);
            }
        } else if let Some(rows) = part.strip_prefix("rows=") {
            node.estimated_rows = rows.parse().unwrap_or(0);
        } else if let Some(width) = part.strip_prefix("width=") {
            node.width = width.parse().unwrap_or(0);
        }
    }

    node
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

#[cfg(test)]
mod tests;
