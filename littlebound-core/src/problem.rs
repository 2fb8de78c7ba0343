//! Labelled travelling-salesman instances.
//!
//! A [`Problem`] holds the square cost table over dense vertex ids together
//! with the side table of human-readable labels. The search itself only
//! ever sees ids.

use std::collections::{BTreeMap, HashSet};

use crate::{CostMatrix, ProblemError};

/// A complete directed graph with a finite cost for every ordered pair of
/// distinct vertices.
///
/// # Examples
/// ```
/// use littlebound_core::Problem;
///
/// # fn main() -> Result<(), littlebound_core::ProblemError> {
/// let problem = Problem::new(vec![vec![0, 2, 9], vec![1, 0, 6], vec![15, 7, 0]])?;
/// assert_eq!(problem.len(), 3);
/// assert_eq!(problem.label(0), Some("1"));
/// assert_eq!(problem.tour_cost(&[0, 1, 2]), Some(23));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    labels: Vec<String>,
    costs: Vec<Vec<u64>>,
    root: CostMatrix,
}

impl Problem {
    /// Validate a square cost table, labelling vertices `1..=n`.
    ///
    /// Diagonal entries are ignored.
    ///
    /// # Errors
    /// Returns [`ProblemError`] when the table is empty, has fewer than two
    /// vertices or is not square.
    pub fn new(costs: Vec<Vec<u64>>) -> Result<Self, ProblemError> {
        let labels = (1..=costs.len()).map(|label| label.to_string()).collect();
        Self::with_labels(labels, costs)
    }

    /// Validate a square cost table with explicit, unique labels.
    ///
    /// # Errors
    /// Returns [`ProblemError`] when the table is empty, has fewer than two
    /// vertices, is not square, or the labels do not match one-to-one.
    pub fn with_labels(labels: Vec<String>, costs: Vec<Vec<u64>>) -> Result<Self, ProblemError> {
        let size = costs.len();
        match size {
            0 => return Err(ProblemError::Empty),
            1 => return Err(ProblemError::TooFewVertices { found: 1 }),
            _ => {}
        }
        let root = CostMatrix::from_costs(&costs)?;
        if labels.len() != size {
            return Err(ProblemError::LabelCount {
                expected: size,
                found: labels.len(),
            });
        }
        let mut seen = HashSet::with_capacity(size);
        if let Some(label) = labels.iter().find(|label| !seen.insert(label.as_str())) {
            return Err(ProblemError::DuplicateLabel {
                label: (*label).clone(),
            });
        }
        Ok(Self {
            labels,
            costs,
            root,
        })
    }

    /// Build from a label-keyed mapping; ids follow ascending label order.
    ///
    /// Self-costs may be omitted.
    ///
    /// # Errors
    /// Returns [`ProblemError::MissingCost`] when an ordered pair of distinct
    /// labels has no cost, plus the errors of [`Problem::with_labels`].
    pub fn from_map(costs: &BTreeMap<String, BTreeMap<String, u64>>) -> Result<Self, ProblemError> {
        let labels: Vec<String> = costs.keys().cloned().collect();
        let mut table = Vec::with_capacity(labels.len());
        for (from, row) in costs {
            let mut entries = Vec::with_capacity(labels.len());
            for to in &labels {
                let cost = match row.get(to) {
                    Some(cost) => *cost,
                    None if to == from => 0,
                    None => {
                        return Err(ProblemError::MissingCost {
                            from: from.clone(),
                            to: to.clone(),
                        });
                    }
                };
                entries.push(cost);
            }
            table.push(entries);
        }
        Self::with_labels(labels, table)
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Always `false`: construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Labels indexed by vertex id.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of a vertex id.
    #[must_use]
    pub fn label(&self, vertex: usize) -> Option<&str> {
        self.labels.get(vertex).map(String::as_str)
    }

    /// Id of a label.
    #[must_use]
    pub fn vertex(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|candidate| candidate == label)
    }

    /// Raw cost table, indexed by vertex id.
    #[must_use]
    pub fn costs(&self) -> &[Vec<u64>] {
        &self.costs
    }

    /// Cost of the edge `from -> to`.
    #[must_use]
    pub fn cost(&self, from: usize, to: usize) -> Option<u64> {
        self.costs.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Root matrix of the search, diagonal forbidden and unreduced.
    #[must_use]
    pub fn cost_matrix(&self) -> CostMatrix {
        self.root.clone()
    }

    /// Total cost of the closed cycle visiting `order` and returning to its
    /// first vertex, or `None` when an id is out of range.
    #[must_use]
    pub fn tour_cost(&self, order: &[usize]) -> Option<u64> {
        let first = *order.first()?;
        let mut total = 0_u64;
        for pair in order.windows(2) {
            let [from, to] = pair else { return None };
            total = total.checked_add(self.cost(*from, *to)?)?;
        }
        let last = *order.last()?;
        total.checked_add(self.cost(last, first)?)
    }

    /// Labels of a vertex order.
    #[must_use]
    pub fn labelled(&self, order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|vertex| {
                self.label(*vertex)
                    .map_or_else(|| vertex.to_string(), str::to_owned)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(values: &[u64]) -> Vec<u64> {
        values.to_vec()
    }

    #[rstest]
    #[case(Vec::new(), ProblemError::Empty)]
    #[case(vec![row(&[0])], ProblemError::TooFewVertices { found: 1 })]
    #[case(
        vec![row(&[0, 1, 2]), row(&[1, 0]), row(&[2, 1, 0])],
        ProblemError::NotSquare { row: 1, expected: 3, found: 2 }
    )]
    fn rejects_malformed_tables(#[case] costs: Vec<Vec<u64>>, #[case] expected: ProblemError) {
        assert_eq!(Problem::new(costs), Err(expected));
    }

    #[rstest]
    fn default_labels_count_from_one() {
        let problem = Problem::new(vec![row(&[0, 3]), row(&[4, 0])]).expect("valid table");
        assert_eq!(problem.labels(), ["1", "2"]);
        assert_eq!(problem.vertex("2"), Some(1));
    }

    #[rstest]
    fn duplicate_labels_are_rejected() {
        let result = Problem::with_labels(
            vec!["a".into(), "a".into()],
            vec![row(&[0, 3]), row(&[4, 0])],
        );
        assert_eq!(
            result,
            Err(ProblemError::DuplicateLabel { label: "a".into() })
        );
    }

    #[rstest]
    fn label_count_must_match() {
        let result = Problem::with_labels(vec!["a".into()], vec![row(&[0, 3]), row(&[4, 0])]);
        assert_eq!(
            result,
            Err(ProblemError::LabelCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[rstest]
    fn mapping_orders_ids_by_label() {
        let costs = BTreeMap::from([
            (
                "b".to_owned(),
                BTreeMap::from([("a".to_owned(), 5), ("c".to_owned(), 1)]),
            ),
            (
                "a".to_owned(),
                BTreeMap::from([("b".to_owned(), 2), ("c".to_owned(), 8)]),
            ),
            (
                "c".to_owned(),
                BTreeMap::from([("a".to_owned(), 3), ("b".to_owned(), 4)]),
            ),
        ]);
        let problem = Problem::from_map(&costs).expect("complete mapping");
        assert_eq!(problem.labels(), ["a", "b", "c"]);
        assert_eq!(problem.cost(1, 2), Some(1));
        assert_eq!(problem.cost(0, 1), Some(2));
    }

    #[rstest]
    fn mapping_reports_missing_pairs() {
        let costs = BTreeMap::from([
            ("a".to_owned(), BTreeMap::from([("b".to_owned(), 2)])),
            ("b".to_owned(), BTreeMap::new()),
        ]);
        assert_eq!(
            Problem::from_map(&costs),
            Err(ProblemError::MissingCost {
                from: "b".into(),
                to: "a".into()
            })
        );
    }

    #[rstest]
    fn tour_cost_closes_the_cycle() {
        let problem = Problem::new(vec![row(&[0, 1, 9]), row(&[9, 0, 2]), row(&[4, 9, 0])])
            .expect("valid table");
        assert_eq!(problem.tour_cost(&[0, 1, 2]), Some(7));
        assert_eq!(problem.tour_cost(&[0, 2, 1]), Some(27));
        assert_eq!(problem.tour_cost(&[0, 7]), None);
        assert_eq!(problem.labelled(&[2, 0]), vec!["3", "1"]);
    }
}
