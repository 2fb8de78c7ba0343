//! Reduced-cost matrix for Little's branch-and-bound.
//!
//! The matrix is stored densely over vertex ids `0..dimension`. Fixing an edge
//! does not shrink the storage: the edge's row and column are marked
//! inactive instead, and every query only looks at live rows and columns.

mod reduction;

pub use reduction::Reduction;

use crate::components::DisjointSet;
use crate::{Edge, ProblemError, ResidualError, Weight};

/// Cost matrix of one branch of the search.
///
/// Besides the cells the matrix tracks the edges committed along the branch
/// (`used_edges`), the vertices they touch and the accumulated lower bound
/// (`min_weight`). The diagonal is always forbidden.
///
/// # Examples
/// ```
/// use littlebound_core::{CostMatrix, Weight};
///
/// # fn main() -> Result<(), littlebound_core::ProblemError> {
/// let mut matrix = CostMatrix::from_costs(&[vec![0, 4, 9], vec![3, 0, 7], vec![5, 8, 0]])?;
/// matrix.reduce();
/// assert_eq!(matrix.min_weight(), 16);
/// assert_eq!(matrix.get(0, 0), Some(Weight::Forbidden));
/// assert!(matrix.validate());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    dimension: usize,
    cells: Vec<Weight>,
    live_rows: Vec<bool>,
    live_columns: Vec<bool>,
    used_edges: Vec<Edge>,
    used_vertices: Vec<bool>,
    components: DisjointSet,
    min_weight: u64,
}

impl CostMatrix {
    /// Build a matrix from square finite costs; the diagonal is overwritten
    /// with [`Weight::Forbidden`].
    ///
    /// # Errors
    /// Returns [`ProblemError`] when `costs` is empty or
    /// not square.
    pub fn from_costs(costs: &[Vec<u64>]) -> Result<Self, ProblemError> {
        let rows = costs
            .iter()
            .map(|row| row.iter().copied().map(Weight::Finite).collect())
            .collect::<Vec<Vec<Weight>>>();
        Self::from_weights(&rows)
    }

    /// Build a matrix from square weights, allowing pre-forbidden cells.
    ///
    /// # Errors
    /// Returns [`ProblemError`] when `rows` is empty or
    /// not square.
    pub fn from_weights(rows: &[Vec<Weight>]) -> Result<Self, ProblemError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(ProblemError::Empty);
        }
        let mut cells = Vec::with_capacity(dimension * dimension);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != dimension {
                return Err(ProblemError::NotSquare {
                    row: index,
                    expected: dimension,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().enumerate().map(|(column, weight)| {
                if column == index {
                    Weight::Forbidden
                } else {
                    *weight
                }
            }));
        }
        Ok(Self {
            dimension,
            cells,
            live_rows: vec![true; dimension],
            live_columns: vec![true; dimension],
            used_edges: Vec::new(),
            used_vertices: vec![false; dimension],
            components: DisjointSet::new(dimension),
            min_weight: 0,
        })
    }

    /// Number of vertices the matrix was built over.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Accumulated lower bound of the branch.
    #[must_use]
    pub const fn min_weight(&self) -> u64 {
        self.min_weight
    }

    /// Edges committed along the branch, in commit order.
    #[must_use]
    pub fn used_edges(&self) -> &[Edge] {
        &self.used_edges
    }

    /// Vertices touched by the committed edges, ascending.
    pub fn used_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        flagged(&self.used_vertices)
    }

    /// Live row ids, ascending.
    pub fn live_rows(&self) -> impl Iterator<Item = usize> + '_ {
        flagged(&self.live_rows)
    }

    /// Live column ids, ascending.
    pub fn live_columns(&self) -> impl Iterator<Item = usize> + '_ {
        flagged(&self.live_columns)
    }

    /// Number of live rows.
    #[must_use]
    pub fn live_row_count(&self) -> usize {
        self.live_rows().count()
    }

    /// Number of live columns.
    #[must_use]
    pub fn live_column_count(&self) -> usize {
        self.live_columns().count()
    }

    /// Whether every row has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_rows().next().is_none()
    }

    /// Whether the live matrix has shrunk to a 2×2 residual.
    #[must_use]
    pub fn is_residual(&self) -> bool {
        self.live_row_count() == 2 && self.live_column_count() == 2
    }

    /// Weight of a live cell, or `None` when the row or column was removed.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<Weight> {
        (self.is_live_row(row) && self.is_live_column(column)).then(|| self.at(row, column))
    }

    fn is_live_row(&self, row: usize) -> bool {
        self.live_rows.get(row).copied().unwrap_or(false)
    }

    fn is_live_column(&self, column: usize) -> bool {
        self.live_columns.get(column).copied().unwrap_or(false)
    }

    fn at(&self, row: usize, column: usize) -> Weight {
        self.cells
            .get(row * self.dimension + column)
            .copied()
            .unwrap_or(Weight::Forbidden)
    }

    fn set(&mut self, row: usize, column: usize, weight: Weight) {
        if row >= self.dimension || column >= self.dimension {
            return;
        }
        if let Some(cell) = self.cells.get_mut(row * self.dimension + column) {
            *cell = weight;
        }
    }

    /// Smallest live weight in `row`, skipping `except` when given.
    fn row_minimum(&self, row: usize, except: Option<usize>) -> Weight {
        self.live_columns()
            .filter(|column| Some(*column) != except)
            .map(|column| self.at(row, column))
            .min()
            .unwrap_or(Weight::Forbidden)
    }

    /// Smallest live weight in `column`, skipping `except` when given.
    fn column_minimum(&self, column: usize, except: Option<usize>) -> Weight {
        self.live_rows()
            .filter(|row| Some(*row) != except)
            .map(|row| self.at(row, column))
            .min()
            .unwrap_or(Weight::Forbidden)
    }

    /// Penalty of forbidding `edge`: the cheapest alternative leaving its
    /// start plus the cheapest alternative entering its end.
    ///
    /// A row or column with no alternative contributes
    /// [`Weight::Forbidden`], making the edge mandatory.
    #[must_use]
    pub fn penalty(&self, edge: Edge) -> Weight {
        self.row_minimum(edge.from, Some(edge.to))
            .saturating_add(self.column_minimum(edge.to, Some(edge.from)))
    }

    /// Zero cell with the largest penalty, scanning rows then columns in
    /// ascending id order; the first maximum wins.
    #[must_use]
    pub fn branch_candidate(&self) -> Option<(Edge, Weight)> {
        let mut best: Option<(Edge, Weight)> = None;
        for row in self.live_rows() {
            for column in self.live_columns() {
                if !self.at(row, column).is_zero() {
                    continue;
                }
                let edge = Edge::new(row, column);
                let penalty = self.penalty(edge);
                if best.is_none_or(|(_, current)| penalty > current) {
                    best = Some((edge, penalty));
                }
            }
        }
        best
    }

    /// Pick the branching edge and commit it to this matrix.
    ///
    /// Returns `None` when the matrix holds no zero cell, i.e. it was not
    /// reduced or is infeasible.
    pub fn choose_and_delete_edge(&mut self) -> Option<Edge> {
        let (edge, penalty) = self.branch_candidate()?;
        log::trace!("branching on {edge} with penalty {penalty}");
        self.include(edge);
        Some(edge)
    }

    /// Commit `edge` to the branch.
    ///
    /// Removes the start's row and the end's column, forbids the reverse
    /// edge, records the edge and forbids every cell that would close a
    /// cycle inside one of the resulting path components.
    pub fn include(&mut self, edge: Edge) {
        if let Some(live) = self.live_rows.get_mut(edge.from) {
            *live = false;
        }
        if let Some(live) = self.live_columns.get_mut(edge.to) {
            *live = false;
        }
        let reverse = edge.reversed();
        self.set(reverse.from, reverse.to, Weight::Forbidden);
        self.used_edges.push(edge);
        for vertex in [edge.from, edge.to] {
            if let Some(used) = self.used_vertices.get_mut(vertex) {
                *used = true;
            }
        }
        self.components.union(edge.from, edge.to);
        self.suppress_subtours();
    }

    fn suppress_subtours(&mut self) {
        for component in self.components.groups() {
            for &start in &component {
                for &end in &component {
                    self.set(start, end, Weight::Forbidden);
                }
            }
        }
    }

    /// Forbid a single edge without committing anything.
    pub fn exclude(&mut self, edge: Edge) {
        self.set(edge.from, edge.to, Weight::Forbidden);
    }

    /// Path components formed by the committed edges.
    ///
    /// Each component lists its vertices ascending; components are ordered
    /// by their smallest vertex.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<usize>> {
        self.components.groups()
    }

    /// Whether every live row and every live column still has a usable cell.
    ///
    /// A matrix failing this check cannot be completed into a tour.
    #[must_use]
    pub fn validate(&self) -> bool {
        let rows_ok = self
            .live_rows()
            .all(|row| self.live_columns().any(|column| !self.at(row, column).is_forbidden()));
        rows_ok
            && self
                .live_columns()
                .all(|column| self.live_rows().any(|row| !self.at(row, column).is_forbidden()))
    }

    /// The two edges closing a reduced 2×2 residual.
    ///
    /// # Errors
    /// Returns [`ResidualError`] when the live matrix is not 2×2 or does not
    /// hold exactly one zero per row and column.
    pub fn final_solution(&self) -> Result<[Edge; 2], ResidualError> {
        let rows = self.live_row_count();
        let columns = self.live_column_count();
        if rows != 2 || columns != 2 {
            return Err(ResidualError::NotTwoByTwo { rows, columns });
        }
        let zeros: Vec<Edge> = self
            .live_rows()
            .flat_map(|row| self.live_columns().map(move |column| Edge::new(row, column)))
            .filter(|edge| self.at(edge.from, edge.to).is_zero())
            .collect();
        match zeros.as_slice() {
            [first, second] if first.from != second.from && first.to != second.to => {
                Ok([*first, *second])
            }
            _ => Err(ResidualError::UnexpectedZeros { found: zeros.len() }),
        }
    }

    /// Vertex order of the tour fixed by the committed edges plus the
    /// residual's closing edges.
    ///
    /// The walk starts at the smallest vertex id and does not repeat it at
    /// the end.
    ///
    /// # Errors
    /// Returns [`ResidualError`] when the residual cannot be closed or the
    /// edges do not form a single cycle over every vertex.
    pub fn completed_tour(&self) -> Result<Vec<usize>, ResidualError> {
        let closing = self.final_solution()?;
        let mut successor: Vec<Option<usize>> = vec![None; self.dimension];
        for edge in self.used_edges.iter().chain(closing.iter()) {
            if let Some(slot) = successor.get_mut(edge.from) {
                *slot = Some(edge.to);
            }
        }
        let mut tour = Vec::with_capacity(self.dimension);
        let mut visited = vec![false; self.dimension];
        let mut current = 0;
        while tour.len() < self.dimension {
            match visited.get_mut(current) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(ResidualError::BrokenCycle { vertex: current }),
            }
            tour.push(current);
            current = successor
                .get(current)
                .copied()
                .flatten()
                .ok_or(ResidualError::BrokenCycle { vertex: current })?;
        }
        if current != 0 {
            return Err(ResidualError::BrokenCycle { vertex: current });
        }
        Ok(tour)
    }

    /// Density metric used to break ties between equal bounds: live rows
    /// plus live columns minus the number of forbidden live cells.
    #[must_use]
    pub fn power(&self) -> i64 {
        let forbidden = self
            .live_rows()
            .map(|row| {
                self.live_columns()
                    .filter(|column| self.at(row, *column).is_forbidden())
                    .count()
            })
            .sum::<usize>();
        let size = self.live_row_count() + self.live_column_count();
        to_signed(size).saturating_sub(to_signed(forbidden))
    }
}

fn flagged(flags: &[bool]) -> impl Iterator<Item = usize> + '_ {
    flags
        .iter()
        .enumerate()
        .filter_map(|(index, flag)| flag.then_some(index))
}

fn to_signed(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests;
