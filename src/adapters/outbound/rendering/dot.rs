//! DOT source generation for bundle graphs.

use crate::bundle_graph::domain::GraphView;
use std::fmt::Write;

/// Escape special characters for quoted DOT identifiers and labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render `graph` as a directed DOT graph named `name`.
///
/// Nodes and edges come out in name order, so identical graphs always
/// produce identical text.
pub fn render_dot(graph: &dyn GraphView, name: &str) -> String {
    let estimated_size = graph.nodes().len() * 60 + graph.edges().len() * 120 + 100;
    let mut output = String::with_capacity(estimated_size);

    let _ = writeln!(output, "digraph \"{}\" {{", escape_label(name));
    output.push_str("  rankdir=TB;\n");
    output.push_str("  node [shape=box, fontsize=10];\n");

    for node in graph.nodes() {
        let _ = writeln!(output, "  \"{}\";", escape_label(node.as_str()));
    }

    if !graph.edges().is_empty() {
        output.push('\n');
    }
    for edge in graph.edges() {
        let _ = writeln!(
            output,
            "  \"{}\" -> \"{}\";",
            escape_label(edge.dependent().as_str()),
            escape_label(edge.dependency().as_str())
        );
    }

    output.push_str("}\n");
    output
}
