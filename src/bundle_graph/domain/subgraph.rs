use super::{BundleName, DependencyEdge, Direction, GraphView};
use std::collections::BTreeSet;

/// Induced subgraph around a focus bundle
///
/// Holds `{focus} ∪ neighbors` and every edge of the source graph whose
/// endpoints both lie in that set, including edges between two neighbors.
/// Owns its data, so it outlives any borrow of the source graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InducedSubgraph {
    focus: BundleName,
    direction: Direction,
    nodes: BTreeSet<BundleName>,
    edges: BTreeSet<DependencyEdge>,
}

impl InducedSubgraph {
    pub(crate) fn new(
        focus: BundleName,
        direction: Direction,
        nodes: BTreeSet<BundleName>,
        edges: BTreeSet<DependencyEdge>,
    ) -> Self {
        Self {
            focus,
            direction,
            nodes,
            edges,
        }
    }

    pub fn focus(&self) -> &BundleName {
        &self.focus
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn nodes(&self) -> &BTreeSet<BundleName> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<DependencyEdge> {
        &self.edges
    }
}

impl GraphView for InducedSubgraph {
    fn nodes(&self) -> &BTreeSet<BundleName> {
        &self.nodes
    }

    fn edges(&self) -> &BTreeSet<DependencyEdge> {
        &self.edges
    }
}
