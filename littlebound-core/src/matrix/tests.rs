//! Unit tests for `CostMatrix`.

use super::*;
use rstest::{fixture, rstest};
use std::collections::BTreeMap;

const F: Weight = Weight::Forbidden;

fn w(value: u64) -> Weight {
    Weight::Finite(value)
}

#[fixture]
fn three_cities() -> CostMatrix {
    CostMatrix::from_costs(&[vec![0, 4, 9], vec![3, 0, 7], vec![5, 8, 0]])
        .expect("square costs should build")
}

/// Every zero cell carries the same penalty of 10.
#[fixture]
fn symmetric_ring() -> CostMatrix {
    CostMatrix::from_weights(&[
        vec![F, w(0), w(5)],
        vec![w(5), F, w(0)],
        vec![w(0), w(5), F],
    ])
    .expect("square weights should build")
}

#[rstest]
fn diagonal_is_forbidden(three_cities: CostMatrix) {
    for vertex in 0..3 {
        assert_eq!(three_cities.get(vertex, vertex), Some(F));
    }
    assert_eq!(three_cities.get(0, 1), Some(w(4)));
}

#[rstest]
fn rejects_ragged_rows() {
    let err = CostMatrix::from_costs(&[vec![0, 1], vec![1]]).expect_err("ragged input");
    assert_eq!(
        err,
        ProblemError::NotSquare {
            row: 1,
            expected: 2,
            found: 1
        }
    );
}

#[rstest]
fn rejects_empty_input() {
    let err = CostMatrix::from_costs(&[]).expect_err("empty input");
    assert_eq!(err, ProblemError::Empty);
}

#[rstest]
fn reduction_records_row_then_column_offsets(mut three_cities: CostMatrix) {
    let reduction = three_cities.reduce();

    assert_eq!(
        reduction.row_offsets,
        BTreeMap::from([(0, 4), (1, 3), (2, 5)])
    );
    assert_eq!(reduction.column_offsets, BTreeMap::from([(2, 4)]));
    assert_eq!(reduction.total(), 16);
    assert_eq!(three_cities.min_weight(), 16);
    assert_eq!(reduction.before.min_weight(), 0);
    assert_eq!(reduction.after, three_cities);
    assert_eq!(three_cities.get(0, 2), Some(w(1)));
    assert_eq!(three_cities.get(2, 1), Some(w(3)));
}

#[rstest]
fn reduction_leaves_a_zero_in_every_line(mut three_cities: CostMatrix) {
    three_cities.reduce();
    for row in 0..3 {
        assert!((0..3).any(|column| three_cities.get(row, column) == Some(Weight::ZERO)));
    }
    for column in 0..3 {
        assert!((0..3).any(|row| three_cities.get(row, column) == Some(Weight::ZERO)));
    }
}

#[rstest]
fn reduction_skips_rows_already_at_zero(mut symmetric_ring: CostMatrix) {
    let reduction = symmetric_ring.reduce();
    assert!(reduction.row_offsets.is_empty());
    assert!(reduction.column_offsets.is_empty());
    assert_eq!(symmetric_ring.min_weight(), 0);
}

#[rstest]
fn penalty_sums_row_and_column_alternatives(mut three_cities: CostMatrix) {
    three_cities.reduce();
    // Row 0 is [F, 0, 1]; column 1 is [0, F, 3].
    assert_eq!(three_cities.penalty(Edge::new(0, 1)), w(4));
    // Row 1 is [0, F, 0]; column 0 is [F, 0, 0].
    assert_eq!(three_cities.penalty(Edge::new(1, 0)), w(0));
}

#[rstest]
fn equal_penalties_pick_the_first_cell_in_row_major_order(symmetric_ring: CostMatrix) {
    let (edge, penalty) = symmetric_ring
        .branch_candidate()
        .expect("ring has zero cells");
    assert_eq!(edge, Edge::new(0, 1));
    assert_eq!(penalty, w(10));
}

#[rstest]
fn largest_penalty_wins_over_earlier_cells() {
    let matrix = CostMatrix::from_weights(&[
        vec![F, w(0), w(1), w(1)],
        vec![w(0), F, w(0), w(1)],
        vec![w(0), w(1), F, w(0)],
        vec![w(9), w(0), w(9), F],
    ])
    .expect("square weights should build");
    // (3, 1) has penalty 9 + 0; every earlier zero cell has at most 1.
    let (edge, penalty) = matrix.branch_candidate().expect("zero cells exist");
    assert_eq!(edge, Edge::new(3, 1));
    assert_eq!(penalty, w(9));
}

#[rstest]
fn missing_alternative_makes_an_edge_mandatory() {
    let matrix = CostMatrix::from_weights(&[
        vec![F, w(0), w(5), w(5)],
        vec![w(0), F, w(0), w(0)],
        vec![w(0), w(0), F, w(0)],
        vec![F, F, w(0), F],
    ])
    .expect("square weights should build");
    let (edge, penalty) = matrix.branch_candidate().expect("zero cells exist");
    assert_eq!(edge, Edge::new(3, 2));
    assert_eq!(penalty, F);
}

#[rstest]
fn including_an_edge_removes_its_row_and_column(mut symmetric_ring: CostMatrix) {
    let edge = symmetric_ring
        .choose_and_delete_edge()
        .expect("ring has zero cells");

    assert_eq!(edge, Edge::new(0, 1));
    assert_eq!(symmetric_ring.live_rows().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(symmetric_ring.live_columns().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(symmetric_ring.get(0, 1), None);
    let reverse = edge.reversed();
    assert_eq!(reverse, Edge::new(1, 0));
    assert_eq!(symmetric_ring.get(reverse.from, reverse.to), Some(F));
    assert_eq!(symmetric_ring.used_edges(), &[Edge::new(0, 1)]);
    assert_eq!(symmetric_ring.used_vertices().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(symmetric_ring.components(), vec![vec![0, 1]]);
}

#[rstest]
fn including_a_chain_forbids_closing_the_subtour() {
    let mut matrix = CostMatrix::from_costs(&[
        vec![0, 1, 1, 1],
        vec![1, 0, 1, 1],
        vec![1, 1, 0, 1],
        vec![1, 1, 1, 0],
    ])
    .expect("square costs should build");
    matrix.include(Edge::new(0, 1));
    matrix.include(Edge::new(1, 2));

    assert_eq!(matrix.get(2, 0), Some(F));
    assert_eq!(matrix.get(2, 3), Some(w(1)));
    assert_eq!(matrix.get(3, 0), Some(w(1)));
    assert_eq!(matrix.components(), vec![vec![0, 1, 2]]);
}

#[rstest]
fn excluding_forbids_one_cell_only(mut three_cities: CostMatrix) {
    three_cities.exclude(Edge::new(0, 1));
    assert_eq!(three_cities.get(0, 1), Some(F));
    assert_eq!(three_cities.live_row_count(), 3);
    assert_eq!(three_cities.live_column_count(), 3);
    assert!(three_cities.used_edges().is_empty());
}

#[rstest]
fn a_fully_forbidden_row_fails_validation(mut three_cities: CostMatrix) {
    assert!(three_cities.validate());
    three_cities.exclude(Edge::new(0, 1));
    three_cities.exclude(Edge::new(0, 2));
    assert!(!three_cities.validate());
    assert_eq!(three_cities.validate(), three_cities.validate());
}

#[rstest]
fn a_fully_forbidden_column_fails_validation(mut three_cities: CostMatrix) {
    three_cities.exclude(Edge::new(1, 0));
    three_cities.exclude(Edge::new(2, 0));
    assert!(!three_cities.validate());
}

#[rstest]
fn residual_closes_into_a_tour(mut symmetric_ring: CostMatrix) {
    symmetric_ring.choose_and_delete_edge();
    symmetric_ring.reduce();

    assert!(symmetric_ring.is_residual());
    assert_eq!(
        symmetric_ring.final_solution(),
        Ok([Edge::new(1, 2), Edge::new(2, 0)])
    );
    assert_eq!(symmetric_ring.completed_tour(), Ok(vec![0, 1, 2]));
}

#[rstest]
fn two_vertices_close_without_branching() {
    let mut matrix =
        CostMatrix::from_costs(&[vec![0, 5], vec![7, 0]]).expect("square costs should build");
    assert_eq!(
        matrix.final_solution(),
        Err(ResidualError::UnexpectedZeros { found: 0 })
    );
    matrix.reduce();
    assert_eq!(matrix.min_weight(), 12);
    assert_eq!(
        matrix.final_solution(),
        Ok([Edge::new(0, 1), Edge::new(1, 0)])
    );
    assert_eq!(matrix.completed_tour(), Ok(vec![0, 1]));
}

#[rstest]
fn final_solution_requires_a_two_by_two_residual(three_cities: CostMatrix) {
    assert_eq!(
        three_cities.final_solution(),
        Err(ResidualError::NotTwoByTwo {
            rows: 3,
            columns: 3
        })
    );
}

#[rstest]
fn power_counts_live_lines_minus_forbidden_cells(mut three_cities: CostMatrix) {
    assert_eq!(three_cities.power(), 3);
    three_cities.exclude(Edge::new(0, 1));
    assert_eq!(three_cities.power(), 2);
    three_cities.include(Edge::new(1, 2));
    // Rows {0, 2} and columns {0, 1}: (0, 0), (0, 1) and (2, 1) are forbidden.
    assert_eq!(three_cities.power(), 1);
}
