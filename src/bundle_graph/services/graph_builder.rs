use crate::bundle_graph::domain::{BundleName, DependencyEdge, Graph};
use std::collections::{BTreeMap, BTreeSet};

/// Bundle name to the names of the bundles it imports from
pub type DependencyMap = BTreeMap<BundleName, Vec<BundleName>>;

/// GraphBuilder service for turning collected dependency facts into a graph
///
/// Dangling dependency names (values that never appear as keys) become
/// nodes with no outgoing edges, so no reported import is lost and
/// neighbor lookups never fail. Repeated imports collapse to one edge.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Builds an immutable graph from a bundle -> dependencies mapping
    ///
    /// Accepts any map-like iterable, e.g. `&DependencyMap` or a
    /// `&HashMap<BundleName, Vec<BundleName>>`.
    pub fn build<'a, I, D>(deps: I) -> Graph
    where
        I: IntoIterator<Item = (&'a BundleName, D)>,
        D: IntoIterator<Item = &'a BundleName>,
    {
        let mut nodes = BTreeSet::new();
        let mut edges = BTreeSet::new();

        for (bundle, dependencies) in deps {
            nodes.insert(bundle.clone());
            for dependency in dependencies {
                if !nodes.contains(dependency) {
                    nodes.insert(dependency.clone());
                }
                edges.insert(DependencyEdge::new(bundle.clone(), dependency.clone()));
            }
        }

        Graph::from_parts(nodes, edges)
    }
}
