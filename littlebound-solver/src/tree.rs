//! Arena-backed search tree.
//!
//! Nodes live in a single vector and refer to each other by [`NodeId`].
//! A node is created as a leaf and turns into an internal node exactly once,
//! when [`SearchTree::expand`] attaches its including and excluding children.

use std::fmt;

use littlebound_core::{CostMatrix, Edge, Reduction};

use crate::SearchError;

/// Index of a node inside a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index; nodes are numbered in creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Children attached to an expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Children {
    /// Branch that commits the chosen edge.
    pub including: NodeId,
    /// Branch that forbids the chosen edge.
    pub excluding: NodeId,
}

/// One branch of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    matrix: CostMatrix,
    prefix: String,
    chosen_edge: Option<Edge>,
    solution: Option<Vec<usize>>,
    parent: Option<NodeId>,
    children: Option<Children>,
}

impl SearchNode {
    const fn leaf(matrix: CostMatrix, prefix: String, parent: Option<NodeId>) -> Self {
        Self {
            matrix,
            prefix,
            chosen_edge: None,
            solution: None,
            parent,
            children: None,
        }
    }

    /// Reduced matrix of the branch.
    #[must_use]
    pub const fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Include/exclude decisions from the root, `1` for including.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Edge this node branched on, once expanded.
    #[must_use]
    pub const fn chosen_edge(&self) -> Option<Edge> {
        self.chosen_edge
    }

    /// Vertex order of the completed tour, for nodes that close one.
    #[must_use]
    pub fn solution(&self) -> Option<&[usize]> {
        self.solution.as_deref()
    }

    /// Parent node; `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Attached children, once expanded.
    #[must_use]
    pub const fn children(&self) -> Option<Children> {
        self.children
    }

    /// Whether the node is still a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Lower bound of the branch.
    #[must_use]
    pub const fn min_weight(&self) -> u64 {
        self.matrix.min_weight()
    }

    /// Density tie-breaker of the branch matrix.
    #[must_use]
    pub fn power(&self) -> i64 {
        self.matrix.power()
    }
}

/// Outcome of expanding one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Edge the parent branched on.
    pub edge: Edge,
    /// Child committing `edge`.
    pub including: NodeId,
    /// Child forbidding `edge`.
    pub excluding: NodeId,
    /// Reduction applied to the including child.
    pub including_reduction: Reduction,
    /// Reduction applied to the excluding child.
    pub excluding_reduction: Reduction,
    /// The including child when it closes a complete tour.
    pub candidate: Option<NodeId>,
    /// Children whose matrix failed validation.
    pub dead: Vec<NodeId>,
}

/// Branch-and-bound tree rooted at a reduced cost matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Start a tree whose root holds `matrix` and an empty prefix.
    #[must_use]
    pub fn new(matrix: CostMatrix) -> Self {
        Self {
            nodes: vec![SearchNode::leaf(matrix, String::new(), None)],
        }
    }

    /// Id of the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Every node with its id, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Ids of every leaf, in creation order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.is_leaf())
            .map(|(id, _)| id)
            .collect()
    }

    /// Reduce the root matrix in place; only meaningful before expansion.
    pub(crate) fn reduce_root(&mut self) -> Option<Reduction> {
        self.nodes.first_mut().map(|root| root.matrix.reduce())
    }

    pub(crate) fn set_solution(&mut self, id: NodeId, solution: Vec<usize>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.solution = Some(solution);
        }
    }

    /// Branch on the leaf `id`.
    ///
    /// Both children start from a copy of the leaf's matrix: the including
    /// child commits the most penalised zero cell, the excluding child
    /// forbids it. Each child is reduced, then checked for feasibility. An
    /// including child that is a valid 2×2 residual is closed into a tour and
    /// returned as the candidate.
    ///
    /// # Errors
    /// Returns [`SearchError`] when `id` is unknown or already expanded, when
    /// the leaf's matrix has no zero cell, or when a valid residual cannot be
    /// closed.
    pub fn expand(&mut self, id: NodeId) -> Result<Expansion, SearchError> {
        let parent = self.node(id).ok_or(SearchError::UnknownNode { node: id })?;
        if !parent.is_leaf() {
            return Err(SearchError::AlreadyExpanded { node: id });
        }

        let mut including = parent.matrix.clone();
        let edge = including
            .choose_and_delete_edge()
            .ok_or(SearchError::NoBranchEdge { node: id })?;
        let mut excluding = parent.matrix.clone();
        excluding.exclude(edge);
        let prefix = parent.prefix.clone();

        let including_reduction = including.reduce();
        let excluding_reduction = excluding.reduce();
        let including_valid = including.validate();
        let excluding_valid = excluding.validate();

        let solution = if including_valid && including.is_residual() {
            let order = including
                .completed_tour()
                .map_err(|source| SearchError::Residual { node: id, source })?;
            Some(order)
        } else {
            None
        };
        let closes_tour = solution.is_some();

        let including_id = self.push(SearchNode::leaf(
            including,
            format!("{prefix}1"),
            Some(id),
        ));
        let excluding_id = self.push(SearchNode::leaf(
            excluding,
            format!("{prefix}0"),
            Some(id),
        ));
        if let Some(order) = solution {
            self.set_solution(including_id, order);
        }
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.chosen_edge = Some(edge);
            node.children = Some(Children {
                including: including_id,
                excluding: excluding_id,
            });
        }

        let mut dead = Vec::new();
        if !including_valid {
            dead.push(including_id);
        }
        if !excluding_valid {
            dead.push(excluding_id);
        }
        log::debug!(
            "expanded node {id} on {edge}: bounds {} / {}, dead {}",
            including_reduction.after.min_weight(),
            excluding_reduction.after.min_weight(),
            dead.len()
        );

        Ok(Expansion {
            edge,
            including: including_id,
            excluding: excluding_id,
            including_reduction,
            excluding_reduction,
            candidate: closes_tour.then_some(including_id),
            dead,
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use littlebound_core::Weight;
    use rstest::{fixture, rstest};

    #[fixture]
    fn three_cities() -> SearchTree {
        let mut matrix = CostMatrix::from_costs(&[vec![0, 4, 9], vec![3, 0, 7], vec![5, 8, 0]])
            .expect("square costs should build");
        matrix.reduce();
        SearchTree::new(matrix)
    }

    #[rstest]
    fn root_is_the_only_leaf(three_cities: SearchTree) {
        assert_eq!(three_cities.len(), 1);
        assert_eq!(three_cities.leaves(), vec![three_cities.root()]);
        let root = three_cities
            .node(three_cities.root())
            .expect("root exists");
        assert_eq!(root.prefix(), "");
        assert_eq!(root.min_weight(), 16);
        assert_eq!(root.parent(), None);
    }

    #[rstest]
    fn expanding_attaches_prefixed_children(mut three_cities: SearchTree) {
        let root = three_cities.root();
        let expansion = three_cities.expand(root).expect("root expands");

        assert_eq!(expansion.edge, Edge::new(0, 1));
        assert_eq!(three_cities.len(), 3);
        let parent = three_cities.node(root).expect("root exists");
        assert_eq!(parent.chosen_edge(), Some(Edge::new(0, 1)));
        assert_eq!(
            parent.children(),
            Some(Children {
                including: expansion.including,
                excluding: expansion.excluding,
            })
        );

        let including = three_cities
            .node(expansion.including)
            .expect("including child exists");
        let excluding = three_cities
            .node(expansion.excluding)
            .expect("excluding child exists");
        assert_eq!(including.prefix(), "1");
        assert_eq!(excluding.prefix(), "0");
        assert_eq!(including.parent(), Some(root));
        assert_eq!(
            three_cities.leaves(),
            vec![expansion.including, expansion.excluding]
        );
    }

    #[rstest]
    fn including_a_closing_residual_yields_a_candidate(mut three_cities: SearchTree) {
        let expansion = three_cities
            .expand(three_cities.root())
            .expect("root expands");

        assert_eq!(expansion.candidate, Some(expansion.including));
        let candidate = three_cities
            .node(expansion.including)
            .expect("including child exists");
        assert_eq!(candidate.solution(), Some([0, 1, 2].as_slice()));
        assert_eq!(candidate.min_weight(), 16);
        assert!(expansion.dead.is_empty());
    }

    #[rstest]
    fn excluding_child_forbids_the_edge_and_raises_the_bound(mut three_cities: SearchTree) {
        let expansion = three_cities
            .expand(three_cities.root())
            .expect("root expands");
        let excluding = three_cities
            .node(expansion.excluding)
            .expect("excluding child exists");

        assert_eq!(excluding.matrix().get(0, 1), Some(Weight::Forbidden));
        // Forbidding (0, 1) costs its penalty of 4.
        assert_eq!(excluding.min_weight(), 20);
        assert_eq!(expansion.excluding_reduction.total(), 4);
    }

    #[rstest]
    fn internal_nodes_cannot_be_expanded_again(mut three_cities: SearchTree) {
        let root = three_cities.root();
        three_cities.expand(root).expect("root expands");
        assert_eq!(
            three_cities.expand(root),
            Err(SearchError::AlreadyExpanded { node: root })
        );
    }

    #[rstest]
    fn unknown_nodes_are_rejected(mut three_cities: SearchTree) {
        let missing = NodeId::new(9);
        assert_eq!(
            three_cities.expand(missing),
            Err(SearchError::UnknownNode { node: missing })
        );
    }

    #[rstest]
    fn unreduced_matrices_have_nothing_to_branch_on() {
        let matrix = CostMatrix::from_costs(&[vec![0, 4, 9], vec![3, 0, 7], vec![5, 8, 0]])
            .expect("square costs should build");
        let mut tree = SearchTree::new(matrix);
        let root = tree.root();
        assert_eq!(
            tree.expand(root),
            Err(SearchError::NoBranchEdge { node: root })
        );
    }

    #[rstest]
    fn excluding_a_mandatory_edge_kills_the_branch() {
        let f = Weight::Forbidden;
        let w = Weight::Finite;
        let mut matrix = CostMatrix::from_weights(&[
            vec![f, w(0), w(5), w(5)],
            vec![w(0), f, w(0), w(0)],
            vec![w(0), w(0), f, w(0)],
            vec![f, f, w(0), f],
        ])
        .expect("square weights should build");
        matrix.reduce();
        let mut tree = SearchTree::new(matrix);
        let expansion = tree.expand(tree.root()).expect("root expands");

        // Row 3 has a single usable cell, so (3, 2) is chosen and excluding it
        // leaves the row empty.
        assert_eq!(expansion.edge, Edge::new(3, 2));
        assert_eq!(expansion.dead, vec![expansion.excluding]);
        assert_eq!(expansion.candidate, None);
    }
}
