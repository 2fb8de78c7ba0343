//! Row and column minimisation.

use std::collections::BTreeMap;

use super::CostMatrix;

/// Record of one [`CostMatrix::reduce`] call, kept for reporting.
///
/// Offsets are keyed by vertex id; rows and columns whose minimum was
/// already zero (or that hold no finite cell) are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    /// Matrix as it was before reducing.
    pub before: CostMatrix,
    /// Matrix after rows and then columns were reduced.
    pub after: CostMatrix,
    /// Amount subtracted from each reduced row.
    pub row_offsets: BTreeMap<usize, u64>,
    /// Amount subtracted from each reduced column, measured on the
    /// row-reduced matrix.
    pub column_offsets: BTreeMap<usize, u64>,
}

impl Reduction {
    /// Sum of every row and column offset.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.row_offsets
            .values()
            .chain(self.column_offsets.values())
            .fold(0_u64, |sum, offset| sum.saturating_add(*offset))
    }
}

impl CostMatrix {
    /// Subtract each live row's minimum from its finite cells, then each
    /// live column's minimum from the row-reduced matrix, adding every
    /// offset to [`CostMatrix::min_weight`].
    ///
    /// Afterwards every feasible row and column holds a zero and
    /// `min_weight` bounds from below the cost of any tour that extends the
    /// committed edges.
    pub fn reduce(&mut self) -> Reduction {
        if self.is_empty() {
            log::warn!("reducing a matrix with no live rows");
        }
        let before = self.clone();

        let mut row_offsets = BTreeMap::new();
        let rows: Vec<usize> = self.live_rows().collect();
        for row in rows {
            let Some(offset) = self.row_minimum(row, None).finite() else {
                continue;
            };
            if offset == 0 {
                continue;
            }
            let columns: Vec<usize> = self.live_columns().collect();
            for column in columns {
                let reduced = self.at(row, column).saturating_sub(offset);
                self.set(row, column, reduced);
            }
            row_offsets.insert(row, offset);
            self.min_weight = self.min_weight.saturating_add(offset);
        }

        let mut column_offsets = BTreeMap::new();
        let columns: Vec<usize> = self.live_columns().collect();
        for column in columns {
            let Some(offset) = self.column_minimum(column, None).finite() else {
                continue;
            };
            if offset == 0 {
                continue;
            }
            let rows: Vec<usize> = self.live_rows().collect();
            for row in rows {
                let reduced = self.at(row, column).saturating_sub(offset);
                self.set(row, column, reduced);
            }
            column_offsets.insert(column, offset);
            self.min_weight = self.min_weight.saturating_add(offset);
        }

        Reduction {
            before,
            after: self.clone(),
            row_offsets,
            column_offsets,
        }
    }
}
