//! File-based search reporter.
//!
//! [`FileReporter`] writes one artefact per search event into a report
//! directory:
//!
//! - `<step>_1.csv` .. `<step>_5.csv`: reduction tables for the root and for
//!   each expansion,
//! - `<step>.gv`: Graphviz snapshots of the search tree,
//! - `solutions.txt`: the tours of the current best weight.
//!
//! Write failures never reach the search. The first one is kept and
//! returned by [`FileReporter::finish`]; later writes are skipped.

use std::collections::BTreeMap;
use std::io;

use camino::Utf8Path;
use cap_std::fs_utf8;
use littlebound_core::{CostMatrix, Edge, Reduction, Tour, Weight};
use littlebound_solver::{NodeId, SearchNode, SearchObserver, SearchTree};
use thiserror::Error;

const SOLUTIONS_FILE: &str = "solutions.txt";

/// A report artefact could not be written.
#[derive(Debug, Error)]
#[error("failed to write report file {file}: {source}")]
pub struct ReportError {
    /// File name, relative to the report directory.
    pub file: String,
    /// Underlying IO failure.
    #[source]
    pub source: io::Error,
}

/// [`SearchObserver`] persisting every event under a directory.
#[derive(Debug)]
pub(crate) struct FileReporter {
    dir: fs_utf8::Dir,
    labels: Vec<String>,
    solutions: Vec<String>,
    error: Option<ReportError>,
}

impl FileReporter {
    /// Create `path` if needed and start an empty solutions log inside it.
    pub(crate) fn create(path: &Utf8Path, labels: Vec<String>) -> Result<Self, ReportError> {
        let dir = littlebound_fs::ensure_dir(path).map_err(|source| ReportError {
            file: path.to_string(),
            source,
        })?;
        let mut reporter = Self {
            dir,
            labels,
            solutions: Vec::new(),
            error: None,
        };
        reporter.write(SOLUTIONS_FILE, "");
        reporter.error.take().map_or(Ok(reporter), Err)
    }

    /// Surface the first write failure, if any.
    pub(crate) fn finish(self) -> Result<(), ReportError> {
        self.error.map_or(Ok(()), Err)
    }

    fn write(&mut self, file: &str, contents: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(source) = self.dir.write(file, contents) {
            log::warn!("report file {file} could not be written: {source}");
            self.error = Some(ReportError {
                file: file.to_owned(),
                source,
            });
        }
    }

    fn write_solutions(&mut self) {
        let contents = self.solutions.concat();
        self.write(SOLUTIONS_FILE, &contents);
    }
}

impl SearchObserver for FileReporter {
    fn initial_reduction(&mut self, reduction: &Reduction, step: u64) {
        let before = render_table(
            &reduction.before,
            &self.labels,
            "",
            Annotation::Offsets(reduction),
        );
        let after = render_table(&reduction.after, &self.labels, "", Annotation::Plain);
        self.write(&format!("{step}_1.csv"), &before);
        self.write(&format!("{step}_2.csv"), &after);
    }

    fn tree(&mut self, tree: &SearchTree, selected: Option<NodeId>, step: u64) {
        let graph = render_tree(tree, selected, &self.labels);
        self.write(&format!("{step}.gv"), &graph);
    }

    fn branches(
        &mut self,
        step: u64,
        prefix: &str,
        parent: &CostMatrix,
        including: &Reduction,
        excluding: &Reduction,
    ) {
        let including_prefix = format!("{prefix}1");
        let excluding_prefix = format!("{prefix}0");
        let tables = [
            render_table(parent, &self.labels, prefix, Annotation::Penalties),
            render_table(
                &including.before,
                &self.labels,
                &including_prefix,
                Annotation::Offsets(including),
            ),
            render_table(
                &including.after,
                &self.labels,
                &including_prefix,
                Annotation::Plain,
            ),
            render_table(
                &excluding.before,
                &self.labels,
                &excluding_prefix,
                Annotation::Offsets(excluding),
            ),
            render_table(
                &excluding.after,
                &self.labels,
                &excluding_prefix,
                Annotation::Plain,
            ),
        ];
        for (part, table) in (1_u8..).zip(tables) {
            self.write(&format!("{step}_{part}.csv"), &table);
        }
    }

    fn tour_found(&mut self, tour: &Tour, step: u64) {
        self.solutions.push(render_solution(tour, step, &self.labels));
        self.write_solutions();
    }

    fn reset(&mut self) {
        self.solutions.clear();
        self.write_solutions();
    }
}

/// Extra cells written around a table.
#[derive(Debug, Clone, Copy)]
enum Annotation<'a> {
    Plain,
    /// A trailing `min` column and row holding the reduction offsets.
    Offsets(&'a Reduction),
    /// Each zero cell followed by its penalty in brackets.
    Penalties,
}

fn label(labels: &[String], vertex: usize) -> String {
    labels
        .get(vertex)
        .cloned()
        .unwrap_or_else(|| vertex.to_string())
}

fn cell(weight: Weight) -> String {
    match weight {
        Weight::Finite(value) => value.to_string(),
        Weight::Forbidden => "inf".to_owned(),
    }
}

fn offset_cell(offsets: &BTreeMap<usize, u64>, vertex: usize) -> String {
    offsets
        .get(&vertex)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Render the live part of `matrix` as comma-separated rows.
///
/// The `min` column only appears when some row was reduced, and the `min`
/// row only when some column was.
fn render_table(
    matrix: &CostMatrix,
    labels: &[String],
    prefix: &str,
    annotation: Annotation<'_>,
) -> String {
    let columns: Vec<usize> = matrix.live_columns().collect();
    let offsets = match annotation {
        Annotation::Offsets(reduction) => Some((&reduction.row_offsets, &reduction.column_offsets)),
        Annotation::Plain | Annotation::Penalties => None,
    };
    let row_offsets = offsets
        .map(|(by_row, _)| by_row)
        .filter(|by_row| !by_row.is_empty());
    let column_offsets = offsets
        .map(|(_, by_column)| by_column)
        .filter(|by_column| !by_column.is_empty());

    let mut lines = Vec::new();
    let mut header = vec![format!("S{prefix}")];
    header.extend(columns.iter().map(|&column| label(labels, column)));
    if row_offsets.is_some() {
        header.push("min".to_owned());
    }
    lines.push(header);

    for row in matrix.live_rows() {
        let mut line = vec![label(labels, row)];
        for &column in &columns {
            let weight = matrix.get(row, column).unwrap_or(Weight::Forbidden);
            if matches!(annotation, Annotation::Penalties) && weight.is_zero() {
                let penalty = matrix.penalty(Edge::new(row, column));
                line.push(format!("{}[{}]", cell(weight), cell(penalty)));
            } else {
                line.push(cell(weight));
            }
        }
        if let Some(rows) = row_offsets {
            line.push(offset_cell(rows, row));
        }
        lines.push(line);
    }

    if let Some(reduced) = column_offsets {
        let mut line = vec!["min".to_owned()];
        line.extend(columns.iter().map(|&column| offset_cell(reduced, column)));
        lines.push(line);
    }

    lines
        .iter()
        .map(|line| format!("{}\n", line.join(", ")))
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn node_label(node: &SearchNode, labels: &[String]) -> String {
    let edge = node.chosen_edge().map_or_else(String::new, |edge| {
        format!(
            "<sub><i>({}, {})</i></sub>",
            escape_html(&label(labels, edge.from)),
            escape_html(&label(labels, edge.to))
        )
    });
    let solution = node.solution().map_or_else(String::new, |order| {
        let visits: Vec<String> = order
            .iter()
            .map(|&vertex| escape_html(&label(labels, vertex)))
            .collect();
        format!("<sub><i><u>{}</u></i></sub>", visits.join(" "))
    });
    format!(
        "S<sub>{}</sub><sup><b>{}</b></sup>{edge}{solution}",
        node.prefix(),
        node.min_weight()
    )
}

/// Render the tree as a Graphviz digraph.
///
/// Nodes are declared depth first with the excluding child ahead of the
/// including one.
fn render_tree(tree: &SearchTree, selected: Option<NodeId>, labels: &[String]) -> String {
    let mut declarations = Vec::new();
    let mut arrows = Vec::new();
    let mut pending = vec![tree.root()];
    while let Some(id) = pending.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        let shape = if selected == Some(id) { "ellipse" } else { "box" };
        declarations.push(format!(
            "        {id} [label=<{}> shape={shape}]",
            node_label(node, labels)
        ));
        if let Some(children) = node.children() {
            arrows.push(format!("    {id} -> {}", children.excluding));
            arrows.push(format!("    {id} -> {}", children.including));
            pending.push(children.including);
            pending.push(children.excluding);
        }
    }

    let mut graph = String::from("digraph {\n    {\n");
    for line in declarations {
        graph.push_str(&line);
        graph.push('\n');
    }
    graph.push_str("    }\n");
    for line in arrows {
        graph.push_str(&line);
        graph.push('\n');
    }
    graph.push_str("}\n");
    graph
}

fn render_solution(tour: &Tour, step: u64, labels: &[String]) -> String {
    let visits: Vec<String> = tour
        .vertices
        .iter()
        .map(|&vertex| label(labels, vertex))
        .collect();
    format!(
        "Step: {step}\tweight = {}\tsolution: ({})\n",
        tour.weight,
        visits.join(", ")
    )
}
