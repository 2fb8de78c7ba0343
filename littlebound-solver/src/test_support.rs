//! Test-only utilities for `littlebound-solver`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use littlebound_core::{CostMatrix, Reduction, Tour};

use crate::{NodeId, SearchObserver, SearchTree};

/// One observed search event, reduced to comparable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The root was reduced.
    InitialReduction {
        /// Step counter.
        step: u64,
        /// Root bound after reduction.
        bound: u64,
    },
    /// A tree snapshot was taken.
    Tree {
        /// Step counter.
        step: u64,
        /// Leaf about to be expanded, if any.
        selected: Option<NodeId>,
        /// Number of nodes in the snapshot.
        nodes: usize,
    },
    /// A leaf was branched.
    Branches {
        /// Step counter.
        step: u64,
        /// Path label of the expanded leaf.
        prefix: String,
        /// Bound of the expanded leaf.
        parent_bound: u64,
        /// Bound of the including child.
        including_bound: u64,
        /// Bound of the excluding child.
        excluding_bound: u64,
    },
    /// A tour was accepted.
    TourFound {
        /// Step counter.
        step: u64,
        /// The accepted tour.
        tour: Tour,
    },
    /// Earlier tours were superseded.
    Reset,
}

/// Observer that records every event in order.
///
/// # Examples
/// ```rust
/// use littlebound_core::CostMatrix;
/// use littlebound_solver::Solver;
/// use littlebound_solver::test_support::RecordingObserver;
///
/// let matrix = CostMatrix::from_costs(&[vec![0, 5], vec![7, 0]]).expect("square");
/// let mut observer = RecordingObserver::default();
/// Solver::new(matrix, &mut observer).start().expect("search completes");
/// assert_eq!(observer.current_tours().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingObserver {
    events: Vec<Event>,
}

impl RecordingObserver {
    /// Every event received so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Tours reported since the last reset.
    #[must_use]
    pub fn current_tours(&self) -> Vec<Tour> {
        let start = self
            .events
            .iter()
            .rposition(|event| matches!(event, Event::Reset))
            .map_or(0, |index| index + 1);
        self.events
            .iter()
            .skip(start)
            .filter_map(|event| match event {
                Event::TourFound { tour, .. } => Some(tour.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of resets received.
    #[must_use]
    pub fn resets(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Reset))
            .count()
    }
}

impl SearchObserver for RecordingObserver {
    fn initial_reduction(&mut self, reduction: &Reduction, step: u64) {
        self.events.push(Event::InitialReduction {
            step,
            bound: reduction.after.min_weight(),
        });
    }

    fn tree(&mut self, tree: &SearchTree, selected: Option<NodeId>, step: u64) {
        self.events.push(Event::Tree {
            step,
            selected,
            nodes: tree.len(),
        });
    }

    fn branches(
        &mut self,
        step: u64,
        prefix: &str,
        parent: &CostMatrix,
        including: &Reduction,
        excluding: &Reduction,
    ) {
        self.events.push(Event::Branches {
            step,
            prefix: prefix.to_owned(),
            parent_bound: parent.min_weight(),
            including_bound: including.after.min_weight(),
            excluding_bound: excluding.after.min_weight(),
        });
    }

    fn tour_found(&mut self, tour: &Tour, step: u64) {
        self.events.push(Event::TourFound {
            step,
            tour: tour.clone(),
        });
    }

    fn reset(&mut self) {
        self.events.push(Event::Reset);
    }
}
