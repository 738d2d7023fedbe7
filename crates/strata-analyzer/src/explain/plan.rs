//! Query Plan Model - data structures for representing query execution plans

use serde::{Deserialize, Serialize};

/// A node in an EXPLAIN query plan tree.
///
/// `children` preserves the order the source plan listed them in (execution
/// order). `actual_rows`/`actual_time_ms` are only present for plans produced
/// with runtime statistics (EXPLAIN ANALYZE). No relationship between
/// `cost_startup` and `cost_total` is enforced; the numbers come from a
/// trusted backend and are displayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    pub operator: String,
    pub relation: Option<String>,
    pub cost_startup: f64,
    pub cost_total: f64,
    pub estimated_rows: u64,
    pub actual_rows: Option<u64>,
    pub actual_time_ms: Option<f64>,
    pub width: u32,
    pub children: Vec<PlanNode>,
    /// Properties not captured by the fields above, as (key, value) pairs.
    pub extra: Vec<(String, String)>,
}

impl PlanNode {
    /// Creates a new plan node with the given operator name
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            relation: None,
            cost_startup: 0.0,
            cost_total: 0.0,
            estimated_rows: 0,
            actual_rows: None,
            actual_time_ms: None,
            width: 0,
            children: Vec::new(),
            extra: Vec::new(),
        }
    }

    /// Sets the relation/table name
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Sets the cost information
    pub fn with_cost(mut self, startup: f64, total: f64) -> Self {
        self.cost_startup = startup;
        self.cost_total = total;
        self
    }

    /// Sets the estimated rows
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.estimated_rows = rows;
        self
    }

    /// Sets the row width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Adds a child node
    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the total number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Returns the maximum depth of this subtree
    pub fn depth(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
        }
    }

    /// Returns true if this is a leaf node (no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns an iterator over this subtree (depth-first, pre-order)
    pub fn iter(&self) -> PlanNodeIterator<'_> {
        PlanNodeIterator::new(self)
    }

    /// Returns the first node in the subtree whose operator matches
    pub fn find_operator(&self, operator: &str) -> Option<&PlanNode> {
        self.iter().find(|n| n.operator == operator)
    }
}

/// Iterator for traversing plan nodes depth-first
pub struct PlanNodeIterator<'a> {
    stack: Vec<&'a PlanNode>,
}

impl<'a> PlanNodeIterator<'a> {
    fn new(root: &'a PlanNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PlanNodeIterator<'a> {
    type Item = &'a PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so we visit them in order
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
