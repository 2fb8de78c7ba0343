//! Hooks for watching a search as it runs.

use littlebound_core::{CostMatrix, Reduction, Tour};

use crate::{NodeId, SearchTree};

/// Receives read-only snapshots of the search.
///
/// Every method defaults to doing nothing. Observers cannot influence the
/// search; implementations that perform IO should buffer their own errors.
pub trait SearchObserver {
    /// The root matrix was reduced before the first expansion.
    fn initial_reduction(&mut self, reduction: &Reduction, step: u64) {
        let _ = (reduction, step);
    }

    /// A leaf was chosen for expansion.
    ///
    /// `selected` is `None` for the final snapshot taken after the search
    /// stops.
    fn tree(&mut self, tree: &SearchTree, selected: Option<NodeId>, step: u64) {
        let _ = (tree, selected, step);
    }

    /// A leaf was split into its including and excluding branches.
    ///
    /// `parent` is the leaf's matrix before branching; `prefix` is its path
    /// label.
    fn branches(
        &mut self,
        step: u64,
        prefix: &str,
        parent: &CostMatrix,
        including: &Reduction,
        excluding: &Reduction,
    ) {
        let _ = (step, prefix, parent, including, excluding);
    }

    /// A tour at least as good as every tour so far was accepted.
    fn tour_found(&mut self, tour: &Tour, step: u64) {
        let _ = (tour, step);
    }

    /// Previously reported tours were beaten and should be discarded.
    fn reset(&mut self) {}
}

impl<O> SearchObserver for &mut O
where
    O: SearchObserver + ?Sized,
{
    fn initial_reduction(&mut self, reduction: &Reduction, step: u64) {
        (**self).initial_reduction(reduction, step);
    }

    fn tree(&mut self, tree: &SearchTree, selected: Option<NodeId>, step: u64) {
        (**self).tree(tree, selected, step);
    }

    fn branches(
        &mut self,
        step: u64,
        prefix: &str,
        parent: &CostMatrix,
        including: &Reduction,
        excluding: &Reduction,
    ) {
        (**self).branches(step, prefix, parent, including, excluding);
    }

    fn tour_found(&mut self, tour: &Tour, step: u64) {
        (**self).tour_found(tour, step);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
