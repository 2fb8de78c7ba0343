//! Property tests for matrix reduction and branching.

use littlebound_core::{CostMatrix, Problem, Weight};
use proptest::prelude::*;

fn cost_table(max_size: usize) -> impl Strategy<Value = Vec<Vec<u64>>> {
    (2..=max_size).prop_flat_map(|size| {
        prop::collection::vec(prop::collection::vec(0_u64..50, size), size)
    })
}

fn table_and_order(max_size: usize) -> impl Strategy<Value = (Vec<Vec<u64>>, Vec<usize>)> {
    cost_table(max_size).prop_flat_map(|costs| {
        let order: Vec<usize> = (0..costs.len()).collect();
        (Just(costs), Just(order).prop_shuffle())
    })
}

fn has_zero(matrix: &CostMatrix, row: usize) -> bool {
    matrix
        .live_columns()
        .any(|column| matrix.get(row, column) == Some(Weight::ZERO))
}

proptest! {
    #[test]
    fn reduced_rows_and_columns_hold_a_zero(costs in cost_table(7)) {
        let mut matrix = CostMatrix::from_costs(&costs)?;
        matrix.reduce();
        for row in matrix.live_rows() {
            prop_assert!(has_zero(&matrix, row));
        }
        for column in matrix.live_columns() {
            prop_assert!(
                matrix
                    .live_rows()
                    .any(|row| matrix.get(row, column) == Some(Weight::ZERO))
            );
        }
    }

    #[test]
    fn root_bound_never_exceeds_a_tour((costs, order) in table_and_order(7)) {
        let problem = Problem::new(costs)?;
        let mut matrix = problem.cost_matrix();
        matrix.reduce();
        let cost = problem.tour_cost(&order);
        prop_assert!(cost.is_some_and(|cost| matrix.min_weight() <= cost));
    }

    #[test]
    fn reducing_twice_adds_nothing(costs in cost_table(6)) {
        let mut matrix = CostMatrix::from_costs(&costs)?;
        let first = matrix.reduce();
        let second = matrix.reduce();
        prop_assert_eq!(second.total(), 0);
        prop_assert_eq!(matrix.min_weight(), first.total());
    }

    #[test]
    fn committing_an_edge_keeps_bounds_monotone(costs in cost_table(6)) {
        let mut matrix = CostMatrix::from_costs(&costs)?;
        matrix.reduce();
        let parent = matrix.min_weight();
        let Some((edge, _)) = matrix.branch_candidate() else {
            return Err(TestCaseError::fail("a reduced matrix has zero cells"));
        };

        let mut including = matrix.clone();
        including.include(edge);
        including.reduce();
        prop_assert!(including.min_weight() >= parent);
        prop_assert_eq!(including.get(edge.to, edge.from), Some(Weight::Forbidden));
        prop_assert!(including.get(edge.from, edge.to).is_none());

        let mut excluding = matrix.clone();
        excluding.exclude(edge);
        excluding.reduce();
        prop_assert!(excluding.min_weight() >= parent);
        prop_assert_eq!(excluding.get(edge.from, edge.to), Some(Weight::Forbidden));
        prop_assert!(excluding.used_edges().is_empty());
    }
}
