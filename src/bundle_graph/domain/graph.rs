use super::BundleName;
use std::collections::{BTreeSet, HashMap};

/// Directed dependency edge: `dependent` imports from `dependency`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyEdge {
    dependent: BundleName,
    dependency: BundleName,
}

impl DependencyEdge {
    pub fn new(dependent: BundleName, dependency: BundleName) -> Self {
        Self {
            dependent,
            dependency,
        }
    }

    pub fn dependent(&self) -> &BundleName {
        &self.dependent
    }

    pub fn dependency(&self) -> &BundleName {
        &self.dependency
    }
}

/// Which adjacency view to follow from a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Bundles the node depends on
    Successors,
    /// Bundles that depend on the node
    Predecessors,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Successors, Direction::Predecessors];
}

/// Read-only node/edge access shared by the full graph and induced subgraphs
///
/// Renderers only need this view, so they can draw either kind of graph.
pub trait GraphView {
    fn nodes(&self) -> &BTreeSet<BundleName>;
    fn edges(&self) -> &BTreeSet<DependencyEdge>;
}

/// Immutable bundle dependency graph
///
/// Both adjacency views are computed once at construction and are total
/// over the node set: every node maps to a (possibly empty) neighbor set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeSet<BundleName>,
    edges: BTreeSet<DependencyEdge>,
    successors: HashMap<BundleName, BTreeSet<BundleName>>,
    predecessors: HashMap<BundleName, BTreeSet<BundleName>>,
}

impl Graph {
    /// Freezes a node and edge set into a graph.
    ///
    /// Edge endpoints missing from `nodes` are added, so the endpoint
    /// invariant holds even for hand-assembled inputs.
    pub(crate) fn from_parts(
        mut nodes: BTreeSet<BundleName>,
        edges: BTreeSet<DependencyEdge>,
    ) -> Self {
        for edge in &edges {
            if !nodes.contains(edge.dependent()) {
                nodes.insert(edge.dependent().clone());
            }
            if !nodes.contains(edge.dependency()) {
                nodes.insert(edge.dependency().clone());
            }
        }

        let mut successors: HashMap<BundleName, BTreeSet<BundleName>> = nodes
            .iter()
            .map(|node| (node.clone(), BTreeSet::new()))
            .collect();
        let mut predecessors = successors.clone();

        for edge in &edges {
            if let Some(out) = successors.get_mut(edge.dependent()) {
                out.insert(edge.dependency().clone());
            }
            if let Some(incoming) = predecessors.get_mut(edge.dependency()) {
                incoming.insert(edge.dependent().clone());
            }
        }

        Self {
            nodes,
            edges,
            successors,
            predecessors,
        }
    }

    pub fn nodes(&self) -> &BTreeSet<BundleName> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<DependencyEdge> {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    /// Looks up the canonical name stored in the graph.
    pub fn node(&self, node: &str) -> Option<&BundleName> {
        self.nodes.get(node)
    }

    /// Direct dependencies of `node`; `None` only if `node` is not in the graph.
    pub fn successors(&self, node: &str) -> Option<&BTreeSet<BundleName>> {
        self.successors.get(node)
    }

    /// Direct dependents of `node`; `None` only if `node` is not in the graph.
    pub fn predecessors(&self, node: &str) -> Option<&BTreeSet<BundleName>> {
        self.predecessors.get(node)
    }

    pub fn neighbors(&self, node: &str, direction: Direction) -> Option<&BTreeSet<BundleName>> {
        match direction {
            Direction::Successors => self.successors(node),
            Direction::Predecessors => self.predecessors(node),
        }
    }

    /// Size of the neighbor set of `node` (0 for unknown nodes)
    pub fn degree(&self, node: &str, direction: Direction) -> usize {
        self.neighbors(node, direction).map_or(0, BTreeSet::len)
    }

    /// Fan-out of `node` (0 for unknown nodes)
    pub fn successor_count(&self, node: &str) -> usize {
        self.degree(node, Direction::Successors)
    }

    /// Fan-in of `node` (0 for unknown nodes)
    pub fn predecessor_count(&self, node: &str) -> usize {
        self.degree(node, Direction::Predecessors)
    }
}

impl GraphView for Graph {
    fn nodes(&self) -> &BTreeSet<BundleName> {
        &self.nodes
    }

    fn edges(&self) -> &BTreeSet<DependencyEdge> {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> BundleName {
        BundleName::new(s).unwrap()
    }

    fn edge(from: &str, to: &str) -> DependencyEdge {
        DependencyEdge::new(name(from), name(to))
    }

    #[test]
    fn test_adjacency_views_are_total() {
        let nodes = ["a", "b", "c"].into_iter().map(name).collect();
        let edges = [edge("a", "b")].into_iter().collect();
        let graph = Graph::from_parts(nodes, edges);

        for node in graph.nodes() {
            assert!(graph.successors(node.as_str()).is_some());
            assert!(graph.predecessors(node.as_str()).is_some());
        }
        assert!(graph.successors("c").unwrap().is_empty());
        assert!(graph.predecessors("c").unwrap().is_empty());
    }

    #[test]
    fn test_adjacency_views_mirror_each_other() {
        let edges: BTreeSet<_> = [edge("a", "b"), edge("a", "c"), edge("b", "c")]
            .into_iter()
            .collect();
        let graph = Graph::from_parts(BTreeSet::new(), edges);

        for e in graph.edges() {
            assert!(graph
                .successors(e.dependent().as_str())
                .unwrap()
                .contains(e.dependency()));
            assert!(graph
                .predecessors(e.dependency().as_str())
                .unwrap()
                .contains(e.dependent()));
        }

        let successor_total: usize = graph
            .nodes()
            .iter()
            .map(|n| graph.successor_count(n.as_str()))
            .sum();
        let predecessor_total: usize = graph
            .nodes()
            .iter()
            .map(|n| graph.predecessor_count(n.as_str()))
            .sum();
        assert_eq!(successor_total, graph.edge_count());
        assert_eq!(predecessor_total, graph.edge_count());
    }

    #[test]
    fn test_from_parts_adds_missing_endpoints() {
        let graph = Graph::from_parts(BTreeSet::new(), [edge("x", "y")].into_iter().collect());
        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains("x"));
        assert!(graph.contains("y"));
    }

    #[test]
    fn test_unknown_node_lookups() {
        let graph = Graph::from_parts(BTreeSet::new(), BTreeSet::new());
        assert!(graph.is_empty());
        assert!(graph.successors("missing").is_none());
        assert!(graph.neighbors("missing", Direction::Predecessors).is_none());
        assert_eq!(graph.successor_count("missing"), 0);
        assert_eq!(graph.predecessor_count("missing"), 0);
    }

    #[test]
    fn test_self_import_is_a_loop_in_both_views() {
        let graph = Graph::from_parts(BTreeSet::new(), [edge("a", "a")].into_iter().collect());
        assert!(graph.successors("a").unwrap().contains("a"));
        assert!(graph.predecessors("a").unwrap().contains("a"));
        assert_eq!(graph.degree("a", Direction::Successors), 1);
        assert_eq!(graph.degree("a", Direction::Predecessors), 1);
    }

    #[test]
    fn test_degree_matches_named_counts() {
        let graph = Graph::from_parts(
            BTreeSet::new(),
            [edge("a", "b"), edge("a", "c"), edge("b", "c")].into_iter().collect(),
        );
        for node in ["a", "b", "c"] {
            assert_eq!(graph.degree(node, Direction::Successors), graph.successor_count(node));
            assert_eq!(graph.degree(node, Direction::Predecessors), graph.predecessor_count(node));
        }
        assert_eq!(graph.degree("c", Direction::Predecessors), 2);
        assert_eq!(graph.degree("missing", Direction::Successors), 0);
    }
}
