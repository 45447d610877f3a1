use crate::bundle_graph::domain::Graph;
use std::fmt::Write;

const BUNDLE_HEADER: &str = "Bundle";
const SUCCESSORS_HEADER: &str = "Successors";
const PREDECESSORS_HEADER: &str = "Predecessors";

/// Fan-out / fan-in of a single bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    pub bundle_name: String,
    pub successor_count: usize,
    pub predecessor_count: usize,
}

impl StatsRow {
    pub fn new(bundle_name: impl Into<String>, successor_count: usize, predecessor_count: usize) -> Self {
        Self {
            bundle_name: bundle_name.into(),
            successor_count,
            predecessor_count,
        }
    }
}

/// Per-bundle statistics, sorted by bundle name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    rows: Vec<StatsRow>,
}

impl StatsTable {
    /// Builds a table from rows in any order
    pub fn from_rows(rows: impl IntoIterator<Item = StatsRow>) -> Self {
        let mut rows: Vec<StatsRow> = rows.into_iter().collect();
        rows.sort_by(|a, b| a.bundle_name.cmp(&b.bundle_name));
        Self { rows }
    }

    pub fn rows(&self) -> &[StatsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Formats the fixed-width text table
    ///
    /// Names are left-justified, counts right-justified; the table is
    /// framed by `=` separators and columns are separated by one space.
    /// The name column is as wide as the longest name (0 for no rows), so
    /// a longer `Bundle` header overhangs the separator.
    pub fn render(&self) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|row| row.bundle_name.len())
            .max()
            .unwrap_or(0);
        let successor_width = self
            .rows
            .iter()
            .map(|row| digits(row.successor_count))
            .chain(std::iter::once(SUCCESSORS_HEADER.len()))
            .max()
            .unwrap_or(SUCCESSORS_HEADER.len());
        let predecessor_width = self
            .rows
            .iter()
            .map(|row| digits(row.predecessor_count))
            .chain(std::iter::once(PREDECESSORS_HEADER.len()))
            .max()
            .unwrap_or(PREDECESSORS_HEADER.len());

        let separator = format!(
            "{} {} {}\n",
            "=".repeat(name_width),
            "=".repeat(successor_width),
            "=".repeat(predecessor_width)
        );

        let mut out = String::with_capacity(separator.len() * (self.rows.len() + 4));
        out.push_str(&separator);
        let _ = writeln!(
            out,
            "{:<nw$} {:>sw$} {:>pw$}",
            BUNDLE_HEADER,
            SUCCESSORS_HEADER,
            PREDECESSORS_HEADER,
            nw = name_width,
            sw = successor_width,
            pw = predecessor_width
        );
        out.push_str(&separator);
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:<nw$} {:>sw$} {:>pw$}",
                row.bundle_name,
                row.successor_count,
                row.predecessor_count,
                nw = name_width,
                sw = successor_width,
                pw = predecessor_width
            );
        }
        out.push_str(&separator);
        out
    }
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// StatsReporter service for fan-in / fan-out statistics
pub struct StatsReporter;

impl StatsReporter {
    /// Collects one row per node straight from the adjacency views
    pub fn collect(graph: &Graph) -> StatsTable {
        StatsTable::from_rows(graph.nodes().iter().map(|node| {
            StatsRow::new(
                node.as_str(),
                graph.successor_count(node.as_str()),
                graph.predecessor_count(node.as_str()),
            )
        }))
    }

    /// Formats the statistics table for `graph`
    pub fn report(graph: &Graph) -> String {
        Self::collect(graph).render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle_graph::domain::BundleName;
    use crate::bundle_graph::services::{DependencyMap, GraphBuilder};

    fn build(entries: &[(&str, &[&str])]) -> Graph {
        let deps: DependencyMap = entries
            .iter()
            .map(|(k, vs)| {
                (
                    BundleName::new(*k).unwrap(),
                    vs.iter().map(|v| BundleName::new(*v).unwrap()).collect(),
                )
            })
            .collect();
        GraphBuilder::build(&deps)
    }

    #[test]
    fn test_report_scenario_a() {
        let graph = build(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])]);
        let expected = "\
= ========== ============
Bundle Successors Predecessors
= ========== ============
A          2            0
B          1            1
C          0            2
= ========== ============
";
        assert_eq!(StatsReporter::report(&graph), expected);
    }

    #[test]
    fn test_report_single_isolated_node() {
        let table = StatsReporter::collect(&build(&[("X", &[])]));
        assert_eq!(table.rows(), &[StatsRow::new("X", 0, 0)]);
    }

    #[test]
    fn test_report_empty_graph_keeps_frame() {
        let graph = build(&[]);
        let output = StatsReporter::report(&graph);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], " ========== ============");
        assert_eq!(lines[1], "Bundle Successors Predecessors");
        assert_eq!(lines[2], lines[0]);
        assert_eq!(lines[3], lines[0]);
    }

    #[test]
    fn test_name_column_tracks_longest_name() {
        let graph = build(&[("org.sakaiproject.nakamura.api", &["org.sakaiproject.nakamura.core"])]);
        let output = StatsReporter::report(&graph);
        let lines: Vec<&str> = output.lines().collect();

        let name_width = "org.sakaiproject.nakamura.core".len();
        assert!(lines[0].starts_with(&format!("{} ", "=".repeat(name_width))));
        assert_eq!(lines[1], format!("{:<w$} Successors Predecessors", "Bundle", w = name_width));
        assert_eq!(
            lines[3],
            format!("{:<w$}          1            0", "org.sakaiproject.nakamura.api", w = name_width)
        );
    }

    #[test]
    fn test_short_names_keep_separator_at_name_width() {
        let graph = build(&[("ab", &["c"])]);
        let output = StatsReporter::report(&graph);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "== ========== ============");
        assert_eq!(lines[1], "Bundle Successors Predecessors");
        assert_eq!(lines[3], "ab          1            0");
        assert_eq!(lines[4], "c           0            1");
    }

    #[test]
    fn test_rows_sorted_and_one_per_node() {
        let graph = build(&[("c", &["a"]), ("b", &["a", "z"]), ("a", &[])]);
        let table = StatsReporter::collect(&graph);

        assert_eq!(table.len(), graph.node_count());
        let names: Vec<&str> = table.rows().iter().map(|r| r.bundle_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "z"]);
    }

    #[test]
    fn test_from_rows_sorts_unordered_input() {
        let table = StatsTable::from_rows(vec![
            StatsRow::new("m", 1, 0),
            StatsRow::new("b", 0, 1),
        ]);
        assert_eq!(table.rows()[0].bundle_name, "b");
        assert_eq!(table.rows()[1].bundle_name, "m");
    }

    #[test]
    fn test_wide_counts_widen_their_column() {
        let table = StatsTable::from_rows(vec![StatsRow::new("a", 12_345_678_901, 0)]);
        let output = table.render();
        let first = output.lines().next().unwrap();
        assert_eq!(first, "= =========== ============");
    }
}
