//! Completed tours.

use crate::Problem;

/// A Hamiltonian cycle over dense vertex ids with its total weight.
///
/// `vertices` starts at vertex `0` and does not repeat it at the end.
///
/// # Examples
/// ```
/// use littlebound_core::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1], 17);
/// assert_eq!(tour.len(), 3);
/// assert_eq!(tour.edges().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Visiting order.
    pub vertices: Vec<usize>,
    /// Total weight of the closed cycle.
    pub weight: u64,
}

impl Tour {
    /// Construct a tour.
    #[must_use]
    pub const fn new(vertices: Vec<usize>, weight: u64) -> Self {
        Self { vertices, weight }
    }

    /// Number of vertices visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the tour visits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive `(from, to)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices
            .iter()
            .copied()
            .zip(self.vertices.iter().copied().cycle().skip(1))
    }

    /// Labels of the visiting order.
    #[must_use]
    pub fn labels(&self, problem: &Problem) -> Vec<String> {
        problem.labelled(&self.vertices)
    }
}
