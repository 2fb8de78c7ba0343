//! Open leaves ordered by bound.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{NodeId, SearchNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Key {
    bound: u64,
    power: i64,
    node: NodeId,
}

/// Leaves that are neither expanded, dead nor closed into a tour.
///
/// Pops the smallest bound first, then the smallest power, then the node
/// created first.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<Key>>,
}

impl Frontier {
    pub(crate) fn push(&mut self, id: NodeId, node: &SearchNode) {
        self.heap.push(Reverse(Key {
            bound: node.min_weight(),
            power: node.power(),
            node: id,
        }));
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(key)| key.node)
    }

    /// Smallest bound among the open leaves.
    pub(crate) fn min_bound(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(key)| key.bound)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchTree;
    use littlebound_core::CostMatrix;
    use rstest::rstest;

    fn tree_with_children() -> (SearchTree, NodeId, NodeId) {
        let mut matrix = CostMatrix::from_costs(&[
            vec![0, 3, 8, 6],
            vec![4, 0, 5, 9],
            vec![7, 2, 0, 4],
            vec![5, 6, 3, 0],
        ])
        .expect("square costs should build");
        matrix.reduce();
        let mut tree = SearchTree::new(matrix);
        let expansion = tree.expand(tree.root()).expect("root expands");
        (tree, expansion.including, expansion.excluding)
    }

    #[rstest]
    fn pops_the_smallest_bound_first() {
        let (tree, including, excluding) = tree_with_children();
        let mut frontier = Frontier::default();
        for id in [excluding, including] {
            let node = tree.node(id).expect("child exists");
            frontier.push(id, node);
        }
        let bound = |id: NodeId| tree.node(id).map(SearchNode::min_weight);

        let first = frontier.pop().expect("two entries");
        let second = frontier.pop().expect("one entry left");
        assert!(bound(first) <= bound(second));
        assert_eq!(frontier.pop(), None);
    }

    #[rstest]
    fn equal_keys_fall_back_to_creation_order() {
        let (tree, including, _) = tree_with_children();
        let node = tree.node(including).expect("child exists");
        let mut frontier = Frontier::default();
        frontier.push(NodeId::new(7), node);
        frontier.push(NodeId::new(3), node);

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.min_bound(), Some(node.min_weight()));
        assert_eq!(frontier.pop(), Some(NodeId::new(3)));
        assert_eq!(frontier.pop(), Some(NodeId::new(7)));
        assert_eq!(frontier.pop(), None);
    }
}
