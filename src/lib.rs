//! bundle-graph - dependency graph inspection for running OSGi servers
//!
//! This library collects bundle import relations from an Apache Felix
//! server (web console or remote shell), builds an immutable dependency
//! graph, draws focus-node views of it and reports per-bundle fan-in and
//! fan-out, following hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bundle_graph`): Graph model, builder, extractor and statistics
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```
//! use bundle_graph::prelude::*;
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<()> {
//! let name = |s: &str| BundleName::new(s);
//! let mut deps = BTreeMap::new();
//! deps.insert(name("A")?, vec![name("B")?, name("C")?]);
//! deps.insert(name("B")?, vec![name("C")?]);
//! deps.insert(name("C")?, vec![]);
//!
//! let graph = GraphBuilder::build(&deps);
//! let view = SubgraphExtractor::extract(&graph, "C", Direction::Predecessors).unwrap();
//! assert_eq!(view.edges().len(), 3);
//!
//! println!("{}", StatsReporter::report(&graph));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bundle_graph;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::OutputDirectory;
    pub use crate::adapters::outbound::network::{
        ConsoleEndpoint, FelixConsoleClient, RetryingDataSource, ShellEndpoint, ShellSessionClient,
    };
    pub use crate::adapters::outbound::rendering::{DotSourceRenderer, GraphvizRenderer};
    pub use crate::application::dto::{InspectionRequest, InspectionResponse, RenderFailure};
    pub use crate::application::use_cases::InspectBundlesUseCase;
    pub use crate::bundle_graph::domain::{
        BundleName, BundleRef, DependencyEdge, Direction, Graph, GraphView, InducedSubgraph,
    };
    pub use crate::bundle_graph::policies::NamespaceFilter;
    pub use crate::bundle_graph::services::{
        DependencyMap, GraphBuilder, StatsReporter, StatsRow, StatsTable, SubgraphExtractor,
    };
    pub use crate::ports::inbound::GraphInspectionPort;
    pub use crate::ports::outbound::{
        BundleDataSource, Collected, GraphRenderer, Layout, OutputWriter, ParseOutcome,
        ProgressReporter, SkipReason, SkippedEntry,
    };
    pub use crate::shared::error::{ExitCode, GraphError};
    pub use crate::shared::Result;
}
