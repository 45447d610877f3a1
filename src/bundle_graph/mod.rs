/// Bundle graph bounded context
///
/// Pure domain logic: bundle identity, the immutable dependency graph,
/// induced-subgraph extraction and fan-in/fan-out statistics.
/// Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
