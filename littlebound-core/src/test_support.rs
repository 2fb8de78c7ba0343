//! Test-only helpers shared by unit, behaviour and property tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use geo::Coord;

use crate::{CostError, CostProvider, CostTable, Problem};

/// The four Manhattan points used throughout the scenario tests:
/// `(4,1)`, `(4,3)`, `(2,7)` and `(9,6)`.
#[must_use]
pub fn scenario_points() -> Vec<Coord<i64>> {
    vec![
        Coord { x: 4, y: 1 },
        Coord { x: 4, y: 3 },
        Coord { x: 2, y: 7 },
        Coord { x: 9, y: 6 },
    ]
}

/// Minimum cycle weight found by trying every order that starts at vertex
/// `0`. Intended for instances of at most eight or nine vertices.
///
/// # Examples
/// ```
/// use littlebound_core::Problem;
/// use littlebound_core::test_support::brute_force_optimum;
///
/// let problem = Problem::new(vec![vec![0, 1, 9], vec![9, 0, 2], vec![4, 9, 0]]).unwrap();
/// assert_eq!(brute_force_optimum(&problem), Some(7));
/// ```
#[must_use]
pub fn brute_force_optimum(problem: &Problem) -> Option<u64> {
    let mut rest: Vec<usize> = (1..problem.len()).collect();
    let mut best: Option<u64> = None;
    permute(&mut rest, 0, &mut |order| {
        let mut tour = Vec::with_capacity(order.len() + 1);
        tour.push(0);
        tour.extend_from_slice(order);
        if let Some(cost) = problem.tour_cost(&tour) {
            best = Some(best.map_or(cost, |current| current.min(cost)));
        }
    });
    best
}

fn permute(items: &mut [usize], start: usize, visit: &mut impl FnMut(&[usize])) {
    if start >= items.len() {
        visit(items);
        return;
    }
    for index in start..items.len() {
        items.swap(start, index);
        permute(items, start + 1, visit);
        items.swap(start, index);
    }
}

/// Whether `order` visits each of `0..size` exactly once.
#[must_use]
pub fn is_permutation(order: &[usize], size: usize) -> bool {
    let mut seen = vec![false; size];
    order.len() == size
        && order.iter().all(|vertex| match seen.get_mut(*vertex) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        })
}

/// A [`CostProvider`] returning a caller-supplied table verbatim.
#[derive(Debug, Clone)]
pub struct FixedCosts {
    table: CostTable,
}

impl FixedCosts {
    /// Construct a provider from a pre-built table.
    #[must_use]
    pub const fn new(table: CostTable) -> Self {
        Self { table }
    }
}

impl CostProvider for FixedCosts {
    fn cost_table(&self, points: &[Coord<i64>]) -> Result<CostTable, CostError> {
        if points.is_empty() {
            return Err(CostError::EmptyInput);
        }
        Ok(self.table.clone())
    }
}
