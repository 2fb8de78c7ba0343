//! Problem inputs: coordinate lists and JSON cost tables.

use geo::Coord;
use littlebound_core::{CostProvider, ManhattanCosts, Problem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CliError;

/// A points file line that is not two integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: expected `x y`, found {content:?}")]
pub struct PointParseError {
    /// One-based line number.
    pub line: usize,
    /// Offending line with surrounding whitespace removed.
    pub content: String,
}

/// Parse whitespace-separated `x y` pairs, one per line.
///
/// Blank lines and anything after a `#` are ignored.
pub(crate) fn parse_points(text: &str) -> Result<Vec<Coord<i64>>, PointParseError> {
    let mut points = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let mut fields = content.split_whitespace().map(str::parse::<i64>);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => points.push(Coord { x, y }),
            _ => {
                return Err(PointParseError {
                    line: index + 1,
                    content: content.to_owned(),
                });
            }
        }
    }
    Ok(points)
}

/// Price points by Manhattan distance, labelling them `1..=n` in input order.
pub(crate) fn problem_from_points(points: &[Coord<i64>]) -> Result<Problem, CliError> {
    let costs = ManhattanCosts.cost_table(points)?;
    log::debug!("priced {} points", points.len());
    Ok(Problem::new(costs)?)
}

/// JSON cost table: `{ "labels": [...], "costs": [[...], ...] }`.
///
/// `labels` is optional and defaults to `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct CostTableFile {
    #[serde(default)]
    pub(crate) labels: Option<Vec<String>>,
    pub(crate) costs: Vec<Vec<u64>>,
}

impl TryFrom<CostTableFile> for Problem {
    type Error = CliError;

    fn try_from(file: CostTableFile) -> Result<Self, Self::Error> {
        let problem = match file.labels {
            Some(labels) => Self::with_labels(labels, file.costs)?,
            None => Self::new(file.costs)?,
        };
        Ok(problem)
    }
}
