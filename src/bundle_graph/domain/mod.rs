/// Domain model for bundle dependency graphs
mod bundle;
mod graph;
mod subgraph;

pub use bundle::{BundleName, BundleRef};
pub use graph::{DependencyEdge, Direction, Graph, GraphView};
pub use subgraph::InducedSubgraph;
