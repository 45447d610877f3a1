use crate::bundle_graph::domain::{BundleName, DependencyEdge, Direction, Graph, InducedSubgraph};
use std::collections::BTreeSet;

/// SubgraphExtractor service for focus-node views of the graph
pub struct SubgraphExtractor;

impl SubgraphExtractor {
    /// Extracts the subgraph induced by `node` and its direct neighbors
    ///
    /// # Returns
    /// `None` when the neighbor set in `direction` is empty (nothing worth
    /// drawing) or when `node` is not part of the graph. This is a normal
    /// outcome, not an error.
    pub fn extract(graph: &Graph, node: &str, direction: Direction) -> Option<InducedSubgraph> {
        let neighbors = graph.neighbors(node, direction)?;
        if neighbors.is_empty() {
            return None;
        }

        let focus = graph.node(node)?.clone();
        let mut nodes = neighbors.clone();
        nodes.insert(focus.clone());

        let edges = Self::induced_edges(graph, &nodes);
        Some(InducedSubgraph::new(focus, direction, nodes, edges))
    }

    /// Every edge of `graph` with both endpoints in `nodes`
    fn induced_edges(graph: &Graph, nodes: &BTreeSet<BundleName>) -> BTreeSet<DependencyEdge> {
        let mut edges = BTreeSet::new();
        for from in nodes {
            let Some(targets) = graph.successors(from.as_str()) else {
                continue;
            };
            for to in targets.iter().filter(|to| nodes.contains(*to)) {
                edges.insert(DependencyEdge::new(from.clone(), to.clone()));
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle_graph::services::{DependencyMap, GraphBuilder};

    fn name(s: &str) -> BundleName {
        BundleName::new(s).unwrap()
    }

    fn build(entries: &[(&str, &[&str])]) -> Graph {
        let deps: DependencyMap = entries
            .iter()
            .map(|(k, vs)| (name(k), vs.iter().map(|v| name(v)).collect()))
            .collect();
        GraphBuilder::build(&deps)
    }

    fn scenario_a() -> Graph {
        build(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])])
    }

    fn node_names(sub: &InducedSubgraph) -> Vec<&str> {
        sub.nodes().iter().map(BundleName::as_str).collect()
    }

    fn edge_names(sub: &InducedSubgraph) -> Vec<(&str, &str)> {
        sub.edges()
            .iter()
            .map(|e| (e.dependent().as_str(), e.dependency().as_str()))
            .collect()
    }

    #[test]
    fn test_successors_include_edges_between_neighbors() {
        let graph = scenario_a();
        let sub = SubgraphExtractor::extract(&graph, "A", Direction::Successors).unwrap();

        assert_eq!(sub.focus().as_str(), "A");
        assert_eq!(sub.direction(), Direction::Successors);
        assert_eq!(node_names(&sub), vec!["A", "B", "C"]);
        assert_eq!(edge_names(&sub), vec![("A", "B"), ("A", "C"), ("B", "C")]);
    }

    #[test]
    fn test_predecessors_include_any_edge_inside_the_node_set() {
        let graph = scenario_a();
        let sub = SubgraphExtractor::extract(&graph, "C", Direction::Predecessors).unwrap();

        assert_eq!(node_names(&sub), vec!["A", "B", "C"]);
        // A -> B joins two in-set nodes, so it belongs to the induced subgraph
        assert_eq!(edge_names(&sub), vec![("A", "B"), ("A", "C"), ("B", "C")]);
    }

    #[test]
    fn test_partial_neighborhood_excludes_outside_edges() {
        let graph = build(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let sub = SubgraphExtractor::extract(&graph, "A", Direction::Successors).unwrap();

        assert_eq!(node_names(&sub), vec!["A", "B"]);
        assert_eq!(edge_names(&sub), vec![("A", "B")]);
    }

    #[test]
    fn test_empty_neighbor_set_yields_no_subgraph() {
        let graph = build(&[("X", &[])]);
        assert!(SubgraphExtractor::extract(&graph, "X", Direction::Successors).is_none());
        assert!(SubgraphExtractor::extract(&graph, "X", Direction::Predecessors).is_none());
    }

    #[test]
    fn test_unknown_node_yields_no_subgraph() {
        let graph = scenario_a();
        assert!(SubgraphExtractor::extract(&graph, "missing", Direction::Successors).is_none());
    }

    #[test]
    fn test_extract_is_none_iff_neighbors_empty() {
        let graph = build(&[("A", &["B"]), ("B", &["C", "D"]), ("E", &[])]);
        for node in graph.nodes() {
            for direction in Direction::ALL {
                let neighbors = graph.neighbors(node.as_str(), direction).unwrap();
                let sub = SubgraphExtractor::extract(&graph, node.as_str(), direction);
                match sub {
                    None => assert!(neighbors.is_empty()),
                    Some(sub) => {
                        let mut expected = neighbors.clone();
                        expected.insert(node.clone());
                        assert_eq!(sub.nodes(), &expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_extraction_does_not_mutate_graph() {
        let graph = scenario_a();
        let before = graph.clone();
        let _ = SubgraphExtractor::extract(&graph, "A", Direction::Successors);
        let _ = SubgraphExtractor::extract(&graph, "C", Direction::Predecessors);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_self_import_keeps_loop_edge() {
        let graph = build(&[("A", &["A", "B"])]);
        let sub = SubgraphExtractor::extract(&graph, "A", Direction::Successors).unwrap();
        assert_eq!(node_names(&sub), vec!["A", "B"]);
        assert_eq!(edge_names(&sub), vec![("A", "A"), ("A", "B")]);
    }
}
