//! Cycle-detecting depth-first traversal
//!
//! The whole walk runs when the traversal is constructed; iterating only
//! replays the recorded order. Visited nodes and relations are tracked in
//! separate sets, so a node and a relation may share an ID. A cycle is
//! reported when a relation seen for the first time leads to a node that
//! was already visited.
//!
//! Directed graphs are walked along outgoing relations only, undirected
//! graphs along every incident relation. A self-loop never reports a cycle:
//! its only connected node is the current one, which is skipped.

use crate::graph::{Attributed, GraphResult, GraphStore, Node, NodeId, RelationId};
use indexmap::set::Iter as IndexSetIter;
use rustc_hash::FxHashSet;
use tracing::debug;

/// One pending node on the explicit work-stack
struct Frame<'a> {
    node: &'a Node,
    relations: IndexSetIter<'a, RelationId>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Node) -> Self {
        Frame {
            node,
            relations: node.traversable_relations().iter(),
        }
    }
}

/// Eager depth-first walk from a start node
///
/// Forward-only: yields the visited nodes in discovery order exactly once.
/// [`has_cycles`](Self::has_cycles) is valid immediately after
/// construction, independent of how far iteration has progressed.
pub struct DepthFirstTraversal<'a> {
    order: std::vec::IntoIter<&'a Node>,
    visited: usize,
    has_cycles: bool,
}

impl<'a> DepthFirstTraversal<'a> {
    /// Walk `store` from `start`.
    ///
    /// Fails with `NodeNotFound` if `start` is not registered in `store`.
    pub fn new(store: &'a GraphStore, start: &NodeId) -> GraphResult<Self> {
        let start = store.get_node(start)?;

        let mut handled_nodes: FxHashSet<&'a NodeId> = FxHashSet::default();
        let mut handled_relations: FxHashSet<&'a RelationId> = FxHashSet::default();
        let mut order: Vec<&'a Node> = Vec::new();
        let mut has_cycles = false;

        handled_nodes.insert(start.id());
        order.push(start);
        let mut stack = vec![Frame::new(start)];

        while let Some(frame) = stack.last_mut() {
            let current = frame.node;
            let Some(rel_id) = frame.relations.next() else {
                stack.pop();
                continue;
            };
            let Ok(relation) = store.get_relation(rel_id) else {
                continue;
            };

            let was_new = handled_relations.insert(rel_id);

            let Some(other_id) = relation
                .other_endpoint(current.id())
                .filter(|other| *other != current.id())
            else {
                continue;
            };

            if handled_nodes.contains(other_id) {
                if was_new {
                    has_cycles = true;
                }
                continue;
            }

            if let Ok(other) = store.get_node(other_id) {
                handled_nodes.insert(other.id());
                order.push(other);
                stack.push(Frame::new(other));
            }
        }

        debug!(
            "Depth-first traversal from {} visited {} nodes (cycles: {})",
            start.id(),
            order.len(),
            has_cycles
        );

        Ok(DepthFirstTraversal {
            visited: order.len(),
            order: order.into_iter(),
            has_cycles,
        })
    }

    /// Whether a back-edge was found during the walk
    pub fn has_cycles(&self) -> bool {
        self.has_cycles
    }

    /// Total number of nodes the walk reached, including already-yielded ones
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Remaining nodes and the cycle flag
    pub fn into_parts(self) -> (Vec<&'a Node>, bool) {
        (self.order.collect(), self.has_cycles)
    }
}

impl<'a> Iterator for DepthFirstTraversal<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for DepthFirstTraversal<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;

    fn ids(traversal: DepthFirstTraversal<'_>) -> Vec<String> {
        traversal.map(|n| n.id().as_str().to_string()).collect()
    }

    fn store_with(nodes: &[&str], relations: &[(&str, &str)], directed: bool) -> GraphStore {
        let mut store = if directed {
            GraphStore::directed()
        } else {
            GraphStore::new()
        };
        for id in nodes {
            store.create_node(Some(*id)).unwrap();
        }
        for (a, b) in relations {
            store.connect(&NodeId::new(*a), &NodeId::new(*b)).unwrap();
        }
        store
    }

    #[test]
    fn test_isolated_node() {
        let store = store_with(&["a"], &[], false);
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(!traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a"]);
    }

    #[test]
    fn test_single_relation() {
        let store = store_with(&["a", "b"], &[("a", "b")], false);
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(!traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a", "b"]);
    }

    #[test]
    fn test_undirected_walks_both_ways() {
        let store = store_with(&["a", "b"], &[("a", "b")], false);
        let traversal = store.traverse(&NodeId::new("b")).unwrap();
        assert_eq!(ids(traversal), vec!["b", "a"]);
    }

    #[test]
    fn test_triangle_has_cycle() {
        let store = store_with(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
            false,
        );
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_self_loop_is_not_a_cycle() {
        // The loop's only connected node is the current one, so it is skipped.
        let store = store_with(&["a"], &[("a", "a")], false);
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(!traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a"]);
    }

    #[test]
    fn test_tree_has_no_cycle() {
        let store = store_with(
            &["root", "l", "r", "ll"],
            &[("root", "l"), ("root", "r"), ("l", "ll")],
            false,
        );
        let traversal = store.traverse(&NodeId::new("root")).unwrap();

        assert!(!traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["root", "l", "ll", "r"]);
    }

    #[test]
    fn test_directed_follows_outgoing_only() {
        let store = store_with(&["a", "b", "c"], &[("a", "b"), ("c", "b")], true);

        let from_a = store.traverse(&NodeId::new("a")).unwrap();
        assert!(!from_a.has_cycles());
        assert_eq!(ids(from_a), vec!["a", "b"]);

        let from_b = store.traverse(&NodeId::new("b")).unwrap();
        assert_eq!(ids(from_b), vec!["b"]);
    }

    #[test]
    fn test_directed_two_cycle() {
        let store = store_with(&["a", "b"], &[("a", "b"), ("b", "a")], true);
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a", "b"]);
    }

    #[test]
    fn test_directed_chain_has_no_cycle() {
        let store = store_with(&["a", "b", "c"], &[("a", "b"), ("b", "c")], true);
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(!traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_directed_diamond_reports_cross_edge() {
        // A first-seen relation into an already-visited node counts, even
        // when it is a cross edge rather than a back edge.
        let store = store_with(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
            true,
        );
        let traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert!(traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_parallel_relations_report_cycle() {
        let store = store_with(&["a", "b"], &[("a", "b"), ("a", "b")], false);
        let traversal = store.traverse(&NodeId::new("a")).unwrap();
        assert!(traversal.has_cycles());
    }

    #[test]
    fn test_flag_independent_of_consumption() {
        let store = store_with(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
            false,
        );
        let mut traversal = store.traverse(&NodeId::new("a")).unwrap();

        assert_eq!(traversal.len(), 3);
        assert!(traversal.has_cycles());
        traversal.next();
        assert_eq!(traversal.len(), 2);
        assert_eq!(traversal.visited_count(), 3);
        assert!(traversal.has_cycles());

        let (rest, cycles) = traversal.into_parts();
        assert_eq!(rest.len(), 2);
        assert!(cycles);
    }

    #[test]
    fn test_node_and_relation_may_share_an_id() {
        let mut store = GraphStore::new();
        let a = store.create_node(Some("a")).unwrap();
        let x = store.create_node(Some("x")).unwrap();
        store.create_relation(Some("x"), Some(&a), Some(&x)).unwrap();

        let traversal = store.traverse(&a).unwrap();
        assert!(!traversal.has_cycles());
        assert_eq!(ids(traversal), vec!["a", "x"]);
    }

    #[test]
    fn test_unregistered_start() {
        let store = GraphStore::new();
        let result = DepthFirstTraversal::new(&store, &NodeId::new("ghost"));
        assert!(matches!(result, Err(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut store = GraphStore::directed();
        let mut prev = store.create_node(None).unwrap();
        let first = prev.clone();
        for _ in 0..100_000 {
            let next = store.create_node(None).unwrap();
            store.connect(&prev, &next).unwrap();
            prev = next;
        }

        let traversal = store.traverse(&first).unwrap();
        assert_eq!(traversal.len(), 100_001);
        assert!(!traversal.has_cycles());
    }
}
