//! Turn point sets into cost tables.
//!
//! The [`CostProvider`] trait abstracts how pairwise costs are derived from
//! integer points. [`ManhattanCosts`] is the built-in provider.

use geo::Coord;

use crate::CostError;

/// Square table of pairwise costs; `table[i][j]` is the cost from point `i`
/// to point `j`.
pub type CostTable = Vec<Vec<u64>>;

/// Compute pairwise costs for a set of points.
///
/// Implementations must return a square `n x n` table where `n` equals
/// `points.len()`, with zeros on the diagonal.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use littlebound_core::{CostProvider, ManhattanCosts};
///
/// let table = ManhattanCosts
///     .cost_table(&[Coord { x: 0, y: 0 }, Coord { x: 2, y: -3 }])
///     .expect("two points");
/// assert_eq!(table, vec![vec![0, 5], vec![5, 0]]);
/// ```
pub trait CostProvider {
    /// Return the cost table for `points`.
    ///
    /// # Errors
    /// Implementations must return [`CostError::EmptyInput`] when `points`
    /// is empty.
    fn cost_table(&self, points: &[Coord<i64>]) -> Result<CostTable, CostError>;
}

/// Taxicab distance `|x1 - x2| + |y1 - y2|`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManhattanCosts;

impl CostProvider for ManhattanCosts {
    fn cost_table(&self, points: &[Coord<i64>]) -> Result<CostTable, CostError> {
        if points.is_empty() {
            return Err(CostError::EmptyInput);
        }
        points
            .iter()
            .enumerate()
            .map(|(from, start)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(to, end)| {
                        start
                            .x
                            .abs_diff(end.x)
                            .checked_add(start.y.abs_diff(end.y))
                            .ok_or(CostError::Overflow { from, to })
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Problem;
    use crate::test_support::{FixedCosts, scenario_points};
    use rstest::rstest;

    #[rstest]
    fn manhattan_table_is_symmetric_with_zero_diagonal() {
        let points = [
            Coord { x: 4, y: 1 },
            Coord { x: 4, y: 3 },
            Coord { x: 2, y: 7 },
        ];
        let table = ManhattanCosts.cost_table(&points).expect("three points");
        assert_eq!(table, vec![vec![0, 2, 8], vec![2, 0, 6], vec![8, 6, 0]]);
    }

    #[rstest]
    fn empty_input_is_rejected() {
        assert_eq!(ManhattanCosts.cost_table(&[]), Err(CostError::EmptyInput));
    }

    #[rstest]
    fn overflow_is_reported() {
        let points = [
            Coord {
                x: i64::MIN,
                y: i64::MIN,
            },
            Coord {
                x: i64::MAX,
                y: i64::MAX,
            },
        ];
        assert_eq!(
            ManhattanCosts.cost_table(&points),
            Err(CostError::Overflow { from: 0, to: 1 })
        );
    }

    #[rstest]
    fn providers_are_interchangeable_behind_the_trait() {
        let table = vec![vec![0, 3, 5], vec![4, 0, 1], vec![2, 6, 0]];
        let fixed = FixedCosts::new(table.clone());
        let providers: [&dyn CostProvider; 2] = [&ManhattanCosts, &fixed];
        let points = scenario_points();

        let tables: Vec<CostTable> = providers
            .iter()
            .map(|provider| provider.cost_table(&points).expect("non-empty points"))
            .collect();
        assert_eq!(tables.get(1), Some(&table));
        let problem = Problem::new(table).expect("square table");
        assert_eq!(problem.tour_cost(&[0, 1, 2]), Some(6));
    }

    #[rstest]
    fn fixed_costs_still_reject_empty_input() {
        let provider = FixedCosts::new(vec![vec![0]]);
        assert_eq!(provider.cost_table(&[]), Err(CostError::EmptyInput));
    }
}
