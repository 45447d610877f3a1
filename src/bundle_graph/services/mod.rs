/// Domain services - stateless algorithms over the domain model
mod graph_builder;
mod stats_reporter;
mod subgraph_extractor;

pub use graph_builder::{DependencyMap, GraphBuilder};
pub use stats_reporter::{StatsReporter, StatsRow, StatsTable};
pub use subgraph_extractor::SubgraphExtractor;
