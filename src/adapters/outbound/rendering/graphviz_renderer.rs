use super::dot::render_dot;
use crate::bundle_graph::domain::GraphView;
use crate::ports::outbound::{GraphRenderer, Layout};
use crate::shared::error::GraphError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// GraphvizRenderer adapter drawing PNG images with the Graphviz tools
///
/// Pipes DOT source into the layout program (`dot` for hierarchical
/// layout) and lets it write the image straight to the destination.
pub struct GraphvizRenderer {
    /// Directory prefix for the Graphviz binaries; `None` resolves via PATH
    bin_dir: Option<std::path::PathBuf>,
}

impl GraphvizRenderer {
    pub fn new() -> Self {
        Self { bin_dir: None }
    }

    pub fn with_bin_dir(bin_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            bin_dir: Some(bin_dir.into()),
        }
    }

    fn program(&self, layout: Layout) -> std::path::PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(layout.program()),
            None => layout.program().into(),
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphRenderer for GraphvizRenderer {
    fn file_extension(&self) -> &'static str {
        "png"
    }

    async fn render(
        &self,
        graph: &(dyn GraphView + Sync),
        layout: Layout,
        destination: &Path,
    ) -> Result<()> {
        let name = destination
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = render_dot(graph, &name);
        let render_error = |details: String| GraphError::RenderError {
            path: destination.to_path_buf(),
            details,
        };

        let mut child = Command::new(self.program(layout))
            .arg("-Tpng")
            .arg("-o")
            .arg(destination)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| render_error(format!("failed to start `{}`: {}", layout.program(), e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .map_err(|e| render_error(format!("failed to send graph to `{}`: {}", layout.program(), e)))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| render_error(e.to_string()))?;
        if !output.status.success() {
            return Err(render_error(format!(
                "`{}` exited with {}: {}",
                layout.program(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
            .into());
        }

        Ok(())
    }
}
