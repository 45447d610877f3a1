use crate::application::dto::{InspectionRequest, InspectionResponse, RenderFailure};
use crate::bundle_graph::domain::{BundleName, BundleRef, Direction, Graph, GraphView};
use crate::bundle_graph::services::{
    DependencyMap, GraphBuilder, StatsRow, StatsTable, SubgraphExtractor,
};
use crate::ports::inbound::GraphInspectionPort;
use crate::ports::outbound::{
    BundleDataSource, Collected, GraphRenderer, Layout, OutputWriter, ProgressReporter,
    SkippedEntry,
};
use crate::shared::error::GraphError;
use crate::shared::security::validate_file_name;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;

/// Fan-out / fan-in recorded by the per-node workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct NodeCounts {
    successors: usize,
    predecessors: usize,
}

impl NodeCounts {
    fn record(&mut self, direction: Direction, count: usize) {
        match direction {
            Direction::Successors => self.successors = count,
            Direction::Predecessors => self.predecessors = count,
        }
    }
}

/// What one per-node worker did
enum NodeOutcome {
    /// Neighbor set was empty; nothing to draw
    Empty,
    /// Counted but not drawn (`render_images` off)
    Counted,
    Rendered(PathBuf),
    Failed(RenderFailure),
}

/// Output of the per-node phase
struct NodePhase {
    stats: StatsTable,
    images_written: Vec<PathBuf>,
    render_failures: Vec<RenderFailure>,
}

/// File name of a per-node drawing
///
/// `<node>.<ext>` for the successor view, `<node>-pred.<ext>` for the
/// predecessor view.
pub fn image_file_name(node: &BundleName, direction: Direction, extension: &str) -> String {
    match direction {
        Direction::Successors => format!("{}.{}", node, extension),
        Direction::Predecessors => format!("{}-pred.{}", node, extension),
    }
}

/// InspectBundlesUseCase - Core use case for bundle dependency inspection
///
/// Orchestrates one run: collect dependency facts from the data source,
/// build the immutable graph, draw the full graph and every non-empty
/// focus-node view, and write the fan-out / fan-in table.
///
/// # Type Parameters
/// * `DS` - BundleDataSource implementation
/// * `GR` - GraphRenderer implementation
/// * `OW` - OutputWriter implementation
/// * `PR` - ProgressReporter implementation
pub struct InspectBundlesUseCase<DS, GR, OW, PR> {
    data_source: DS,
    renderer: GR,
    output: OW,
    progress_reporter: PR,
}

impl<DS, GR, OW, PR> InspectBundlesUseCase<DS, GR, OW, PR>
where
    DS: BundleDataSource,
    GR: GraphRenderer,
    OW: OutputWriter,
    PR: ProgressReporter,
{
    /// Creates a new InspectBundlesUseCase with injected dependencies
    pub fn new(data_source: DS, renderer: GR, output: OW, progress_reporter: PR) -> Self {
        Self {
            data_source,
            renderer,
            output,
            progress_reporter,
        }
    }

    /// Executes one inspection run
    ///
    /// # Errors
    /// Transport failures during collection abort the run before any graph
    /// is built. Output directory and stats file failures are fatal too.
    /// Failed renders are not errors; they are listed in the response.
    pub async fn execute(&self, request: InspectionRequest) -> Result<InspectionResponse> {
        validate_file_name(&request.root_name).map_err(|e| GraphError::Validation {
            message: format!("root graph name: {}", e),
        })?;

        // Step 1: Output directory exists before anything is written
        self.output.prepare()?;

        // Step 2: Collect every bundle's imports; all of them are needed
        // before the graph can resolve dangling references
        let (dependency_map, skipped_entries) = self.collect_with_session(&request).await?;

        // Step 3: Freeze the graph
        let graph = GraphBuilder::build(&dependency_map);
        self.progress_reporter.report(&format!(
            "📊 Built graph: {} bundle(s), {} dependency edge(s)",
            graph.node_count(),
            graph.edge_count()
        ));

        // Step 4: Full graph drawing
        let mut images_written = Vec::new();
        let mut render_failures = Vec::new();
        if request.render_images {
            match self.render_full_graph(&graph, &request.root_name).await {
                Ok(path) => images_written.push(path),
                Err(failure) => render_failures.push(failure),
            }
        }

        // Step 5: Per-node extraction, drawing and statistics
        let phase = self.process_nodes(&graph, &request).await;
        images_written.extend(phase.images_written);
        render_failures.extend(phase.render_failures);

        // Step 6: Statistics table
        let stats_path = self
            .output
            .write_text(&request.stats_file_name, &phase.stats.render())?;

        let response = InspectionResponse {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            stats: phase.stats,
            stats_path,
            images_written,
            render_failures,
            skipped_entries,
            finished_at: chrono::Utc::now(),
        };
        self.report_summary(&response);
        Ok(response)
    }

    /// Runs collection and always releases the data source session
    async fn collect_with_session(
        &self,
        request: &InspectionRequest,
    ) -> Result<(DependencyMap, Vec<SkippedEntry>)> {
        let collected = self.collect_dependencies(request).await;

        if let Err(e) = self.data_source.finish().await {
            tracing::warn!(error = %e, "failed to close data source session");
        }

        collected
    }

    /// Lists the namespace bundles and queries their imports concurrently
    async fn collect_dependencies(
        &self,
        request: &InspectionRequest,
    ) -> Result<(DependencyMap, Vec<SkippedEntry>)> {
        self.progress_reporter.report(&format!(
            "🔍 Listing bundles from {}...",
            self.data_source.describe()
        ));

        let listing = self
            .data_source
            .list_bundles()
            .await
            .context("Failed to list bundles")?;
        let mut skipped = Vec::new();
        log_skipped("bundle listing", &listing.skipped);
        skipped.extend(listing.skipped);

        let bundles = listing.items;
        let total = bundles.len();
        self.progress_reporter
            .report(&format!("✅ Found {} bundle(s) in namespace", total));
        if total == 0 {
            self.progress_reporter
                .report_error("⚠️  Warning: No bundles matched the namespace.");
        }

        let mut queries = stream::iter(bundles.iter())
            .map(|bundle| self.query_imports(bundle))
            .buffer_unordered(request.concurrency);

        let mut dependency_map = DependencyMap::new();
        let mut done = 0;
        while let Some(result) = queries.next().await {
            let (bundle, imports) = result?;
            done += 1;
            self.progress_reporter
                .report_progress(done, total, Some(bundle.name().as_str()));

            log_skipped(bundle.name().as_str(), &imports.skipped);
            skipped.extend(imports.skipped);
            // several installed versions may share a symbolic name
            dependency_map
                .entry(bundle.name().clone())
                .or_default()
                .extend(imports.items);
        }

        Ok((dependency_map, skipped))
    }

    async fn query_imports<'b>(
        &self,
        bundle: &'b BundleRef,
    ) -> Result<(&'b BundleRef, Collected<BundleName>)> {
        let imports = self
            .data_source
            .imports_of(bundle)
            .await
            .with_context(|| format!("Failed to query imports of {}", bundle.name()))?;
        Ok((bundle, imports))
    }

    async fn render_full_graph(
        &self,
        graph: &Graph,
        root_name: &str,
    ) -> std::result::Result<PathBuf, RenderFailure> {
        let destination = self
            .output
            .path_for(&format!("{}.{}", root_name, self.renderer.file_extension()));
        self.render_to(graph, destination).await
    }

    async fn render_to(
        &self,
        graph: &(dyn GraphView + Sync),
        destination: PathBuf,
    ) -> std::result::Result<PathBuf, RenderFailure> {
        match self
            .renderer
            .render(graph, Layout::Hierarchical, &destination)
            .await
        {
            Ok(()) => Ok(destination),
            Err(e) => {
                tracing::debug!(path = %destination.display(), error = %e, "render failed");
                Err(RenderFailure {
                    destination,
                    details: format!("{:#}", e),
                })
            }
        }
    }

    /// Extracts both focus views of every node, drawing the non-empty ones
    ///
    /// Workers share only the counts accumulator; the table is reduced
    /// from it once every worker has finished.
    async fn process_nodes(&self, graph: &Graph, request: &InspectionRequest) -> NodePhase {
        let accumulator: DashMap<BundleName, NodeCounts> = DashMap::new();
        let jobs: Vec<(&BundleName, Direction)> = graph
            .nodes()
            .iter()
            .flat_map(|node| Direction::ALL.map(|direction| (node, direction)))
            .collect();
        let total = jobs.len();

        if request.render_images && total > 0 {
            self.progress_reporter
                .report("🎨 Rendering focus-node graphs...");
        }

        let mut workers = stream::iter(jobs)
            .map(|(node, direction)| {
                self.process_node(graph, node, direction, request.render_images, &accumulator)
            })
            .buffer_unordered(request.concurrency);

        let mut images_written = Vec::new();
        let mut render_failures = Vec::new();
        let mut done = 0;
        while let Some((node, outcome)) = workers.next().await {
            done += 1;
            if request.render_images {
                self.progress_reporter
                    .report_progress(done, total, Some(node.as_str()));
            }
            match outcome {
                NodeOutcome::Rendered(path) => images_written.push(path),
                NodeOutcome::Failed(failure) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Failed to render {}: {}",
                        failure.destination.display(),
                        failure.details
                    ));
                    render_failures.push(failure);
                }
                NodeOutcome::Empty | NodeOutcome::Counted => {}
            }
        }

        let stats = StatsTable::from_rows(graph.nodes().iter().map(|node| {
            let counts = accumulator.get(node).map(|c| *c).unwrap_or_default();
            StatsRow::new(node.as_str(), counts.successors, counts.predecessors)
        }));

        NodePhase {
            stats,
            images_written,
            render_failures,
        }
    }

    async fn process_node<'g>(
        &self,
        graph: &Graph,
        node: &'g BundleName,
        direction: Direction,
        render_images: bool,
        accumulator: &DashMap<BundleName, NodeCounts>,
    ) -> (&'g BundleName, NodeOutcome) {
        let Some(subgraph) = SubgraphExtractor::extract(graph, node.as_str(), direction) else {
            return (node, NodeOutcome::Empty);
        };

        accumulator
            .entry(node.clone())
            .or_default()
            .record(direction, graph.degree(node.as_str(), direction));

        if !render_images {
            return (node, NodeOutcome::Counted);
        }

        let file_name = image_file_name(node, direction, self.renderer.file_extension());
        let destination = self.output.path_for(&file_name);
        let outcome = match self.render_to(&subgraph, destination).await {
            Ok(path) => NodeOutcome::Rendered(path),
            Err(failure) => NodeOutcome::Failed(failure),
        };
        (node, outcome)
    }

    fn report_summary(&self, response: &InspectionResponse) {
        self.progress_reporter.report(&format!(
            "   - Entries skipped during collection: {}",
            response.skipped_entries.len()
        ));
        self.progress_reporter.report(&format!(
            "   - Images written: {}",
            response.images_written.len()
        ));
        if !response.render_failures.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} image(s) could not be rendered",
                response.render_failures.len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Statistics written to {} at {}",
            response.stats_path.display(),
            response.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
}

#[async_trait(?Send)]
impl<DS, GR, OW, PR> GraphInspectionPort for InspectBundlesUseCase<DS, GR, OW, PR>
where
    DS: BundleDataSource,
    GR: GraphRenderer,
    OW: OutputWriter,
    PR: ProgressReporter,
{
    async fn inspect(&self, request: InspectionRequest) -> Result<InspectionResponse> {
        self.execute(request).await
    }
}

fn log_skipped(source: &str, skipped: &[SkippedEntry]) {
    for entry in skipped {
        tracing::debug!(source, entry = %entry.entry, reason = %entry.reason, "skipped entry");
    }
}
