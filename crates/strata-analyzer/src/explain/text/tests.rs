//! Tests for the text-format EXPLAIN parser

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parses_single_scan_line() {
    let text = "Seq Scan on cur_data  (cost=0.00..1234.56 rows=50000 width=120)";
    let node = parse_plan_text(text).unwrap();

    assert_eq!(node.operator, "Seq Scan");
    assert_eq!(node.relation.as_deref(), Some("cur_data"));
    assert!((node.cost_startup - 0.0).abs() < f64::EPSILON);
    assert!((node.cost_total - 1234.56).abs() < 0.01);
    assert_eq!(node.estimated_rows, 50000);
    assert_eq!(node.width, 120);
    assert!(node.children.is_empty());
}

#[test]
fn parses_join_with_two_children() {
    let text = "Hash Join  (cost=0.00..100.00 rows=50 width=20)\n  -> Seq Scan on orders  (cost=0.00..10.00 rows=100 width=8)\n  -> Hash  (cost=0.00..5.00 rows=10 width=12)";
    let root = parse_plan_text(text).unwrap();

    assert_eq!(root.operator, "Hash Join");
    assert_eq!(root.relation, None);
    assert!((root.cost_startup - 0.0).abs() < f64::EPSILON);
    assert!((root.cost_total - 100.0).abs() < f64::EPSILON);
    assert_eq!(root.estimated_rows, 50);
    assert_eq!(root.width, 20);
    assert_eq!(root.children.len(), 2);

    let scan = &root.children[0];
    assert_eq!(scan.operator, "Seq Scan");
    assert_eq!(scan.relation.as_deref(), Some("orders"));
    assert!((scan.cost_total - 10.0).abs() < f64::EPSILON);
    assert_eq!(scan.estimated_rows, 100);
    assert_eq!(scan.width, 8);
    assert!(scan.children.is_empty());

    let hash = &root.children[1];
    assert_eq!(hash.operator, "Hash");
    assert_eq!(hash.relation, None);
    assert!((hash.cost_total - 5.0).abs() < f64::EPSILON);
    assert_eq!(hash.estimated_rows, 10);
    assert_eq!(hash.width, 12);
    assert!(hash.children.is_empty());
}

#[test]
fn nests_grandchildren_by_indentation() {
    let text = "Aggregate  (cost=0.00..200.00 rows=1 width=8)\n  -> Hash Join  (cost=0.00..100.00 rows=50 width=20)\n    -> Seq Scan on orders  (cost=0.00..10.00 rows=100 width=8)\n    -> Hash  (cost=0.00..5.00 rows=10 width=12)\n      -> Seq Scan on users  (cost=0.00..2.00 rows=10 width=12)";
    let root = parse_plan_text(text).unwrap();

    assert_eq!(root.operator, "Aggregate");
    assert_eq!(root.children.len(), 1);
    let join = &root.children[0];
    assert_eq!(join.operator, "Hash Join");
    assert_eq!(join.children.len(), 2);
    assert_eq!(join.children[1].children.len(), 1);
    assert_eq!(
        join.children[1].children[0].relation.as_deref(),
        Some("users")
    );
    assert_eq!(root.node_count(), 5);
    assert_eq!(root.depth(), 4);
}

#[test]
fn children_keep_source_order() {
    let text = "Append  (cost=0.00..30.00 rows=30 width=4)\n  -> Seq Scan on part_a  (cost=0.00..10.00 rows=10 width=4)\n  -> Seq Scan on part_b  (cost=0.00..10.00 rows=10 width=4)\n  -> Seq Scan on part_c  (cost=0.00..10.00 rows=10 width=4)";
    let root = parse_plan_text(text).unwrap();

    let relations: Vec<&str> = root
        .children
        .iter()
        .filter_map(|c| c.relation.as_deref())
        .collect();
    assert_eq!(relations, vec!["part_a", "part_b", "part_c"]);
}

#[test]
fn malformed_numbers_default_to_zero() {
    let text = "Seq Scan on t  (cost=bad rows=abc width=x)";
    let node = parse_plan_text(text).unwrap();

    assert_eq!(node.operator, "Seq Scan");
    assert_eq!(node.relation.as_deref(), Some("t"));
    assert!((node.cost_startup - 0.0).abs() < f64::EPSILON);
    assert!((node.cost_total - 0.0).abs() < f64::EPSILON);
    assert_eq!(node.estimated_rows, 0);
    assert_eq!(node.width, 0);
}

#[test]
fn line_without_cost_annotation_keeps_whole_text_as_operator() {
    let node = parse_plan_text("Filter: (region = 'us-east-1')").unwrap();
    assert_eq!(node.operator, "Filter: (region = 'us-east-1')");
    assert_eq!(node.relation, None);
    assert_eq!(node.estimated_rows, 0);
}

#[test]
fn cost_fields_are_order_independent() {
    let node = parse_plan_text("Limit  (cost=1.00..2.00 width=16 rows=5)").unwrap();
    assert_eq!(node.estimated_rows, 5);
    assert_eq!(node.width, 16);
    assert!((node.cost_total - 2.0).abs() < f64::EPSILON);
}

#[test]
fn empty_input_yields_none() {
    assert!(parse_plan_text("").is_none());
    assert!(parse_plan_text("\n").is_none());
    assert!(parse_plan_text("   ").is_none());
}
