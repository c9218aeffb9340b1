use super::*;

#[test]
fn new_node_has_no_links() {
    let n = Node::new(1, 1, "a", 10i64);
    assert!(n.prev.is_none());
    assert!(n.next.is_none());
    assert!(n.up.is_none());
    assert!(n.down.is_none());
    assert_eq!(n.count, 1);
    assert_eq!(n.score, 10);
}

#[test]
fn level_distinguishes_bottom_from_summary_nodes() {
    let bottom = Node::new(1, 1, "a", 1i64);
    let summary = Node::new(2, 3, "a", 1i64);
    assert_eq!(bottom.level, 1);
    assert_ne!(summary.level, 1);
}
