//! Union-find over the vertices touched by committed edges.

/// Disjoint-set forest with union by rank and path halving.
///
/// Only vertices passed to [`DisjointSet::union`] are considered members;
/// the rest stay singleton roots and are ignored by [`DisjointSet::groups`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    member: Vec<bool>,
}

impl DisjointSet {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            member: vec![false; size],
        }
    }

    /// Representative of `vertex` without compressing paths.
    pub(crate) fn root(&self, vertex: usize) -> usize {
        let mut current = vertex;
        while let Some(&next) = self.parent.get(current) {
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn find(&mut self, vertex: usize) -> usize {
        let mut current = vertex;
        loop {
            let Some(&next) = self.parent.get(current) else {
                return current;
            };
            if next == current {
                return current;
            }
            let grandparent = self.parent.get(next).copied().unwrap_or(next);
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = grandparent;
            }
            current = grandparent;
        }
    }

    pub(crate) fn union(&mut self, lhs: usize, rhs: usize) {
        for vertex in [lhs, rhs] {
            if let Some(flag) = self.member.get_mut(vertex) {
                *flag = true;
            }
        }
        let lhs_root = self.find(lhs);
        let rhs_root = self.find(rhs);
        if lhs_root == rhs_root {
            return;
        }
        let lhs_rank = self.rank.get(lhs_root).copied().unwrap_or(0);
        let rhs_rank = self.rank.get(rhs_root).copied().unwrap_or(0);
        let (child, parent) = if lhs_rank < rhs_rank {
            (lhs_root, rhs_root)
        } else {
            (rhs_root, lhs_root)
        };
        if let Some(slot) = self.parent.get_mut(child) {
            *slot = parent;
        }
        if lhs_rank == rhs_rank
            && let Some(rank) = self.rank.get_mut(parent)
        {
            *rank = rank.saturating_add(1);
        }
    }

    /// Member vertices grouped by component.
    ///
    /// Groups are ordered by their smallest vertex and list members in
    /// ascending order.
    pub(crate) fn groups(&self) -> Vec<Vec<usize>> {
        let mut slot_of_root: Vec<Option<usize>> = vec![None; self.parent.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (vertex, _) in self.member.iter().enumerate().filter(|(_, m)| **m) {
            let root = self.root(vertex);
            let existing = slot_of_root.get(root).copied().flatten();
            match existing {
                Some(slot) => {
                    if let Some(group) = groups.get_mut(slot) {
                        group.push(vertex);
                    }
                }
                None => {
                    if let Some(entry) = slot_of_root.get_mut(root) {
                        *entry = Some(groups.len());
                    }
                    groups.push(vec![vertex]);
                }
            }
        }
        groups
    }
}
