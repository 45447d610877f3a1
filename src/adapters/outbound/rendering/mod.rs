/// Rendering adapters for drawing bundle graphs
mod dot;
mod dot_source_renderer;
mod graphviz_renderer;

pub use dot::render_dot;
pub use dot_source_renderer::DotSourceRenderer;
pub use graphviz_renderer::GraphvizRenderer;
