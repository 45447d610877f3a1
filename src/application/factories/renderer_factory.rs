use crate::adapters::outbound::rendering::{DotSourceRenderer, GraphvizRenderer};
use crate::config::ImageFormat;
use crate::ports::outbound::GraphRenderer;

/// Factory for creating GraphRenderer instances
///
/// Centralizes the mapping from requested image format to renderer.
pub struct RendererFactory;

impl RendererFactory {
    /// Creates a renderer producing files of the given format
    pub fn create(format: ImageFormat) -> Box<dyn GraphRenderer> {
        match format {
            ImageFormat::Png => Box::new(GraphvizRenderer::new()),
            ImageFormat::Dot => Box::new(DotSourceRenderer::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_png_renderer() {
        assert_eq!(RendererFactory::create(ImageFormat::Png).file_extension(), "png");
    }

    #[test]
    fn test_create_dot_renderer() {
        assert_eq!(RendererFactory::create(ImageFormat::Dot).file_extension(), "dot");
    }
}
