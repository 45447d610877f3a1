use super::dot::render_dot;
use crate::bundle_graph::domain::GraphView;
use crate::ports::outbound::{GraphRenderer, Layout};
use crate::shared::error::GraphError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// DotSourceRenderer adapter writing Graphviz DOT source instead of images
///
/// Needs no external tools; the layout choice is left to whoever runs
/// Graphviz on the files later.
pub struct DotSourceRenderer;

impl DotSourceRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DotSourceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphRenderer for DotSourceRenderer {
    fn file_extension(&self) -> &'static str {
        "dot"
    }

    async fn render(
        &self,
        graph: &(dyn GraphView + Sync),
        _layout: Layout,
        destination: &Path,
    ) -> Result<()> {
        let name = destination
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = render_dot(graph, &name);

        tokio::fs::write(destination, source)
            .await
            .map_err(|e| GraphError::FileWriteError {
                path: destination.to_path_buf(),
                details: e.to_string(),
            })?;
        Ok(())
    }
}
