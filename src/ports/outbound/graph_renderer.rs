use crate::bundle_graph::domain::GraphView;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Layout algorithm requested from the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Layered top-to-bottom drawing (Graphviz `dot`)
    Hierarchical,
}

impl Layout {
    /// Graphviz program implementing the layout
    pub fn program(&self) -> &'static str {
        match self {
            Layout::Hierarchical => "dot",
        }
    }
}

/// GraphRenderer port for laying out and drawing graphs
///
/// The core never lays out graphs itself; it hands a read-only view and a
/// destination path to an implementation of this port.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// File extension (without the dot) of the files this renderer produces
    fn file_extension(&self) -> &'static str;

    /// Lays out `graph` and writes the drawing to `destination`
    ///
    /// # Errors
    /// Returns an error if layout fails or the file cannot be written
    async fn render(
        &self,
        graph: &(dyn GraphView + Sync),
        layout: Layout,
        destination: &Path,
    ) -> Result<()>;
}

#[async_trait]
impl<R: GraphRenderer + ?Sized> GraphRenderer for Box<R> {
    fn file_extension(&self) -> &'static str {
        (**self).file_extension()
    }

    async fn render(
        &self,
        graph: &(dyn GraphView + Sync),
        layout: Layout,
        destination: &Path,
    ) -> Result<()> {
        (**self).render(graph, layout, destination).await
    }
}
