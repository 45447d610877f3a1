use async_trait::async_trait;
use bundle_graph::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// What the renderer was asked to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

/// GraphRenderer that records every request instead of drawing
///
/// Writes nothing to disk. File names listed with `failing_on` are
/// rejected the way a crashing `dot` process would be.
#[derive(Default, Clone)]
pub struct RecordingRenderer {
    drawings: Arc<Mutex<BTreeMap<PathBuf, Drawing>>>,
    failing: Vec<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.push(file_name.to_string());
        self
    }

    /// File names drawn so far, sorted
    pub fn file_names(&self) -> Vec<String> {
        self.drawings
            .lock()
            .unwrap()
            .keys()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    pub fn drawing(&self, file_name: &str) -> Option<Drawing> {
        self.drawings
            .lock()
            .unwrap()
            .iter()
            .find(|(path, _)| path.ends_with(file_name))
            .map(|(_, drawing)| drawing.clone())
    }
}

#[async_trait]
impl GraphRenderer for RecordingRenderer {
    fn file_extension(&self) -> &'static str {
        "png"
    }

    async fn render(
        &self,
        graph: &(dyn GraphView + Sync),
        _layout: Layout,
        destination: &Path,
    ) -> Result<()> {
        if self.failing.iter().any(|f| destination.ends_with(f)) {
            anyhow::bail!("dot terminated by signal 11");
        }

        let drawing = Drawing {
            nodes: graph.nodes().iter().map(|n| n.to_string()).collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| (e.dependent().to_string(), e.dependency().to_string()))
                .collect(),
        };
        self.drawings
            .lock()
            .unwrap()
            .insert(destination.to_path_buf(), drawing);
        Ok(())
    }
}
