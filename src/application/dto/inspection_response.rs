use crate::bundle_graph::services::StatsTable;
use crate::ports::outbound::SkippedEntry;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A per-node drawing that could not be produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub destination: PathBuf,
    pub details: String,
}

/// InspectionResponse - Internal response DTO for the bundle inspection use case
///
/// Carries what a run produced so the caller can present a summary and
/// pick an exit code.
#[derive(Debug, Clone)]
pub struct InspectionResponse {
    /// Number of bundles in the graph (including dangling dependencies)
    pub node_count: usize,
    /// Number of distinct dependency edges
    pub edge_count: usize,
    /// Fan-out / fan-in table, as written to the stats file
    pub stats: StatsTable,
    /// Path of the written statistics file
    pub stats_path: PathBuf,
    /// Files produced by the renderer
    pub images_written: Vec<PathBuf>,
    /// Renders that failed; the run still completed
    pub render_failures: Vec<RenderFailure>,
    /// Scraped entries dropped during collection
    pub skipped_entries: Vec<SkippedEntry>,
    pub finished_at: DateTime<Utc>,
}

impl InspectionResponse {
    /// True when every requested image was written
    pub fn is_complete(&self) -> bool {
        self.render_failures.is_empty()
    }
}
